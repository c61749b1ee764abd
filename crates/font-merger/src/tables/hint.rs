//! TrueType hinting checks
//!
//! `fpgm`, `prep` and `cvt ` are copied from the base font only. Imported
//! glyphs lose their instructions by default, so they render unhinted rather
//! than calling into a font program written for other outlines.

use log::{debug, warn};
use read_fonts::{FontRef, types::Tag};

const HINT_TABLES: [Tag; 3] = [Tag::new(b"fpgm"), Tag::new(b"prep"), Tag::new(b"cvt ")];

/// Whether a font carries any global hinting table
pub fn has_hinting(font: &FontRef) -> bool {
    HINT_TABLES.iter().any(|tag| font.table_data(*tag).is_some())
}

/// Warn when kept auxiliary instructions run against a different font program
pub fn check_hint_compatibility(base: &FontRef, aux: &FontRef, keep_aux_hinting: bool) {
    let compatible = HINT_TABLES.iter().all(|&tag| {
        match (base.table_data(tag), aux.table_data(tag)) {
            (Some(a), Some(b)) => a.as_bytes() == b.as_bytes(),
            (None, None) => true,
            _ => false,
        }
    });

    debug!("Hinting: base={}, auxiliary={}", has_hinting(base), has_hinting(aux));

    if !compatible && keep_aux_hinting && has_hinting(aux) {
        warn!(
            "Fonts have different TrueType hinting programs. \
             Kept instructions of imported glyphs may not render correctly."
        );
    }
}
