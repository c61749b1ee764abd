//! Merge the glyphs of an auxiliary TrueType font into a base font.
//!
//! The base font wins: every codepoint it already maps keeps its glyph, and
//! the auxiliary font only contributes the codepoints the base font lacks
//! (plus the components those glyphs are built from).

mod error;
mod merger;
mod options;
mod plan;
mod scale;
mod strategies;
mod tables;
mod types;

pub use error::{MergeError, Result};
pub use merger::{MergeReport, Merger};
pub use options::Options;
pub use plan::{MergePlan, glyph_names};
pub use scale::Scale;
pub use tables::cmap::read_mappings;
pub use types::{Codepoint, GlyphId, GlyphName, MegaGlyphId, Source, TableTag};

/// Merge an auxiliary font into a base font using default options.
///
/// # Example
///
/// ```no_run
/// use hanmono_font_merger::merge_fonts_bytes;
///
/// let latin = std::fs::read("JetBrainsMonoNerdFontMono-Regular.ttf").unwrap();
/// let cjk = std::fs::read("LXGWWenKaiMono-Regular.ttf").unwrap();
/// let merged = merge_fonts_bytes(&latin, &cjk).unwrap();
/// ```
pub fn merge_fonts_bytes(base: &[u8], aux: &[u8]) -> Result<Vec<u8>> {
    Merger::default().merge(&[base, aux])
}
