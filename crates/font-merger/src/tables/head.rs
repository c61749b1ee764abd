//! head table merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{head::Head, loca::LocaFormat},
};

use crate::{
    Result,
    scale::Scale,
    strategies::{max, min},
};

/// The base `head` with its bounds widened to cover the auxiliary glyphs
pub fn merge_head(
    base: &FontRef,
    aux: &FontRef,
    scale: Scale,
    loca_format: LocaFormat,
) -> Result<Head> {
    let base_head = base.head()?;
    let aux_head = aux.head()?;

    let mut head: Head = base_head.to_owned_table();
    head.x_min = min(&[base_head.x_min(), scale.apply(aux_head.x_min())])?;
    head.y_min = min(&[base_head.y_min(), scale.apply(aux_head.y_min())])?;
    head.x_max = max(&[base_head.x_max(), scale.apply(aux_head.x_max())])?;
    head.y_max = max(&[base_head.y_max(), scale.apply(aux_head.y_max())])?;
    head.lowest_rec_ppem = max(&[base_head.lowest_rec_ppem(), aux_head.lowest_rec_ppem()])?;
    head.checksum_adjustment = 0;
    head.index_to_loc_format = match loca_format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    };

    Ok(head)
}
