//! OS/2 table merging

use std::collections::BTreeMap;

use read_fonts::{FontRef, TableProvider};
use write_fonts::{from_obj::ToOwnedTable, tables::os2::Os2};

use crate::{
    strategies::union,
    types::{Codepoint, MegaGlyphId},
};

/// The base OS/2 table, extended with the auxiliary font's coverage
///
/// Unicode and code page ranges are OR-ed and the character index range is
/// taken from the merged cmap. Vertical metrics, `usWinAscent` and
/// `usWinDescent` included, keep their base values. Returns `None` if the base
/// font has no OS/2 table.
pub fn merge_os2(
    base: &FontRef,
    aux: &FontRef,
    cmap: &BTreeMap<Codepoint, MegaGlyphId>,
) -> Option<Os2> {
    let base_os2 = base.os2().ok()?;
    let mut os2: Os2 = base_os2.to_owned_table();

    if let Ok(aux_os2) = aux.os2() {
        os2.ul_unicode_range_1 |= aux_os2.ul_unicode_range_1();
        os2.ul_unicode_range_2 |= aux_os2.ul_unicode_range_2();
        os2.ul_unicode_range_3 |= aux_os2.ul_unicode_range_3();
        os2.ul_unicode_range_4 |= aux_os2.ul_unicode_range_4();

        if os2.ul_code_page_range_1.is_some() {
            os2.ul_code_page_range_1 =
                union([os2.ul_code_page_range_1, aux_os2.ul_code_page_range_1()]);
            os2.ul_code_page_range_2 =
                union([os2.ul_code_page_range_2, aux_os2.ul_code_page_range_2()]);
        }
    }

    let (first, last) = char_index_range(cmap);
    os2.us_first_char_index = first;
    os2.us_last_char_index = last;

    Some(os2)
}

/// First and last mapped codepoint, clamped to the BMP as the field requires
fn char_index_range(cmap: &BTreeMap<Codepoint, MegaGlyphId>) -> (u16, u16) {
    let clamp = |cp: &Codepoint| cp.to_u32().min(0xFFFF) as u16;
    let first = cmap.keys().next().map(clamp).unwrap_or(0);
    let last = cmap.keys().next_back().map(clamp).unwrap_or(0);
    (first, last)
}
