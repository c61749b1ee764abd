//! maxp table merging

use read_fonts::{FontRef, TableProvider, tables::maxp::Maxp as ReadMaxp};
use write_fonts::{from_obj::ToOwnedTable, tables::maxp::Maxp};

use crate::{Result, strategies::max};

/// The base `maxp` with the merged glyph count and a profile large enough for
/// the imported glyphs
///
/// Hinting limits (storage, function and instruction definitions) stay those
/// of the base font, whose `fpgm` is the one that survives. The instruction
/// size limit only grows when imported glyphs keep their instructions.
pub fn merge_maxp(
    base: &FontRef,
    aux: &FontRef,
    total_glyphs: u16,
    keep_aux_hinting: bool,
) -> Result<Maxp> {
    let base_maxp = base.maxp()?;
    let aux_maxp = aux.maxp()?;

    let mut maxp: Maxp = base_maxp.to_owned_table();
    maxp.num_glyphs = total_glyphs;

    // version 0.5 tables carry no profile
    if maxp.max_points.is_none() {
        return Ok(maxp);
    }

    let widest = |field: fn(&ReadMaxp) -> Option<u16>| -> Result<Option<u16>> {
        Ok(Some(max(&[
            field(&base_maxp).unwrap_or(0),
            field(&aux_maxp).unwrap_or(0),
        ])?))
    };

    maxp.max_points = widest(|m| m.max_points())?;
    maxp.max_contours = widest(|m| m.max_contours())?;
    maxp.max_composite_points = widest(|m| m.max_composite_points())?;
    maxp.max_composite_contours = widest(|m| m.max_composite_contours())?;
    maxp.max_zones = widest(|m| m.max_zones())?;
    maxp.max_twilight_points = widest(|m| m.max_twilight_points())?;
    maxp.max_stack_elements = widest(|m| m.max_stack_elements())?;
    maxp.max_component_elements = widest(|m| m.max_component_elements())?;
    maxp.max_component_depth = widest(|m| m.max_component_depth())?;
    if keep_aux_hinting {
        maxp.max_size_of_instructions = widest(|m| m.max_size_of_instructions())?;
    }

    Ok(maxp)
}
