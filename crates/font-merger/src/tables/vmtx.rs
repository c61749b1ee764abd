//! vmtx and vhea merging
//!
//! Vertical metrics follow the base font: when it has none, the merged font
//! has none either, even if the auxiliary font is set up for vertical text.

use read_fonts::{FontRef, TableProvider};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        vhea::Vhea,
        vmtx::{LongMetric, Vmtx},
    },
};

use crate::{
    Result,
    plan::MergePlan,
    strategies::{max, min},
    tables::hmtx::{Metric, compact, expand},
};

/// Build vmtx and vhea, or `None` when the base font has no vertical metrics
pub fn merge_vertical(
    base: &FontRef,
    aux: &FontRef,
    plan: &MergePlan,
) -> Result<Option<(Vmtx, Vhea)>> {
    let Some(base_metrics) = read_v_metrics(base) else {
        return Ok(None);
    };
    let base_vhea = base.vhea()?;
    let scale = plan.scale();

    // without vertical metrics an imported glyph gets a full em and no bearing
    let default_metric: Metric = (base.head()?.units_per_em(), 0);
    let aux_metrics = read_v_metrics(aux);

    let mut metrics: Vec<Metric> = Vec::with_capacity(plan.total_glyphs() as usize);
    metrics.extend_from_slice(&base_metrics[..plan.base_glyphs() as usize]);
    metrics.extend(plan.imported().iter().map(|gid| {
        aux_metrics
            .as_ref()
            .and_then(|m| m.get(gid.to_u16() as usize))
            .map(|&(advance, tsb)| (scale.apply_u16(advance), scale.apply(tsb)))
            .unwrap_or(default_metric)
    }));

    let (long, bearings) = compact(&metrics);
    let vmtx = Vmtx {
        v_metrics: long
            .iter()
            .map(|&(advance, side_bearing)| LongMetric { advance, side_bearing })
            .collect(),
        top_side_bearings: bearings,
    };

    let mut vhea: Vhea = base_vhea.to_owned_table();
    let mut advance_heights = vec![base_vhea.advance_height_max().to_u16()];
    if aux_metrics.is_none() && !plan.imported().is_empty() {
        advance_heights.push(default_metric.0);
    }
    let mut min_tsbs = vec![base_vhea.min_top_side_bearing().to_i16()];
    let mut min_bsbs = vec![base_vhea.min_bottom_side_bearing().to_i16()];
    let mut y_extents = vec![base_vhea.y_max_extent().to_i16()];
    if let Ok(aux_vhea) = aux.vhea() {
        advance_heights.push(scale.apply_u16(aux_vhea.advance_height_max().to_u16()));
        min_tsbs.push(scale.apply(aux_vhea.min_top_side_bearing().to_i16()));
        min_bsbs.push(scale.apply(aux_vhea.min_bottom_side_bearing().to_i16()));
        y_extents.push(scale.apply(aux_vhea.y_max_extent().to_i16()));
    }
    vhea.advance_height_max = font_types::UfWord::new(max(&advance_heights)?);
    vhea.min_top_side_bearing = font_types::FWord::new(min(&min_tsbs)?);
    vhea.min_bottom_side_bearing = font_types::FWord::new(min(&min_bsbs)?);
    vhea.y_max_extent = font_types::FWord::new(max(&y_extents)?);
    vhea.number_of_long_ver_metrics = long.len() as u16;

    Ok(Some((vmtx, vhea)))
}

/// Per-glyph vertical metrics, `None` unless both vhea and vmtx are present
fn read_v_metrics(font: &FontRef) -> Option<Vec<Metric>> {
    font.vhea().ok()?;
    let vmtx = font.vmtx().ok()?;
    let num_glyphs = font.maxp().ok()?.num_glyphs() as usize;
    let long: Vec<Metric> =
        vmtx.v_metrics().iter().map(|m| (m.advance.get(), m.side_bearing.get())).collect();
    let bearings: Vec<i16> = vmtx.top_side_bearings().iter().map(|b| b.get()).collect();
    Some(expand(&long, &bearings, num_glyphs))
}
