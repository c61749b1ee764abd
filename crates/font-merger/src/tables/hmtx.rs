//! hmtx and hhea merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
    },
};

use crate::{
    Result,
    plan::MergePlan,
    strategies::{max, min},
};

/// One glyph's advance and side bearing
pub type Metric = (u16, i16);

/// Build hmtx and the matching hhea for the merged glyph order
///
/// Line metrics (ascender, descender, line gap, caret) come from the base
/// font; extents are widened to cover the imported glyphs.
pub fn merge_horizontal(base: &FontRef, aux: &FontRef, plan: &MergePlan) -> Result<(Hmtx, Hhea)> {
    let scale = plan.scale();
    let base_metrics = read_h_metrics(base)?;
    let aux_metrics = read_h_metrics(aux)?;

    let mut metrics: Vec<Metric> = Vec::with_capacity(plan.total_glyphs() as usize);
    metrics.extend_from_slice(&base_metrics[..plan.base_glyphs() as usize]);
    metrics.extend(plan.imported().iter().map(|gid| {
        let (advance, lsb) = aux_metrics.get(gid.to_u16() as usize).copied().unwrap_or_default();
        (scale.apply_u16(advance), scale.apply(lsb))
    }));

    let (long, bearings) = compact(&metrics);
    let hmtx = Hmtx {
        h_metrics: long
            .iter()
            .map(|&(advance, side_bearing)| LongMetric { advance, side_bearing })
            .collect(),
        left_side_bearings: bearings,
    };

    let base_hhea = base.hhea()?;
    let aux_hhea = aux.hhea()?;
    let mut hhea: Hhea = base_hhea.to_owned_table();
    hhea.advance_width_max = font_types::UfWord::new(max(&[
        base_hhea.advance_width_max().to_u16(),
        scale.apply_u16(aux_hhea.advance_width_max().to_u16()),
    ])?);
    hhea.min_left_side_bearing = font_types::FWord::new(min(&[
        base_hhea.min_left_side_bearing().to_i16(),
        scale.apply(aux_hhea.min_left_side_bearing().to_i16()),
    ])?);
    hhea.min_right_side_bearing = font_types::FWord::new(min(&[
        base_hhea.min_right_side_bearing().to_i16(),
        scale.apply(aux_hhea.min_right_side_bearing().to_i16()),
    ])?);
    hhea.x_max_extent = font_types::FWord::new(max(&[
        base_hhea.x_max_extent().to_i16(),
        scale.apply(aux_hhea.x_max_extent().to_i16()),
    ])?);
    hhea.number_of_h_metrics = long.len() as u16;

    Ok((hmtx, hhea))
}

/// Per-glyph horizontal metrics of a font, one entry per glyph
fn read_h_metrics(font: &FontRef) -> Result<Vec<Metric>> {
    let num_glyphs = font.maxp()?.num_glyphs() as usize;
    let hmtx = font.hmtx()?;
    let long: Vec<Metric> =
        hmtx.h_metrics().iter().map(|m| (m.advance.get(), m.side_bearing.get())).collect();
    let bearings: Vec<i16> = hmtx.left_side_bearings().iter().map(|b| b.get()).collect();
    Ok(expand(&long, &bearings, num_glyphs))
}

/// Expand long metrics plus trailing side bearings into one metric per glyph
///
/// Glyphs past the long metrics repeat the last advance.
pub fn expand(long: &[Metric], bearings: &[i16], num_glyphs: usize) -> Vec<Metric> {
    let last_advance = long.last().map(|(advance, _)| *advance).unwrap_or(0);
    (0..num_glyphs)
        .map(|gid| match long.get(gid) {
            Some(metric) => *metric,
            None => (last_advance, bearings.get(gid - long.len()).copied().unwrap_or(0)),
        })
        .collect()
}

/// Split metrics into long metrics and trailing side bearings
///
/// The trailing run of glyphs sharing the last advance collapses into bare
/// side bearings, which keeps a monospace font's table small.
pub fn compact(metrics: &[Metric]) -> (Vec<Metric>, Vec<i16>) {
    let Some(&(last_advance, _)) = metrics.last() else {
        return (Vec::new(), Vec::new());
    };
    let mut num_long = metrics.len();
    while num_long > 1 && metrics[num_long - 2].0 == last_advance {
        num_long -= 1;
    }
    let long = metrics[..num_long].to_vec();
    let bearings = metrics[num_long..].iter().map(|(_, bearing)| *bearing).collect();
    (long, bearings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_repeats_last_advance() {
        let metrics = expand(&[(500, 10), (600, 20)], &[30, 40], 4);
        assert_eq!(metrics, vec![(500, 10), (600, 20), (600, 30), (600, 40)]);
    }

    #[test]
    fn test_expand_missing_bearings() {
        let metrics = expand(&[(600, 0)], &[], 3);
        assert_eq!(metrics, vec![(600, 0), (600, 0), (600, 0)]);
    }

    #[test]
    fn test_compact_monospace() {
        let (long, bearings) = compact(&[(0, 0), (600, 1), (600, 2), (600, 3)]);
        assert_eq!(long, vec![(0, 0), (600, 1)]);
        assert_eq!(bearings, vec![2, 3]);
    }

    #[test]
    fn test_compact_mixed_widths() {
        let (long, bearings) = compact(&[(600, 1), (600, 2), (1200, 3)]);
        assert_eq!(long, vec![(600, 1), (600, 2), (1200, 3)]);
        assert!(bearings.is_empty());
    }

    #[test]
    fn test_compact_roundtrips_through_expand() {
        let metrics = vec![(500, 5), (1000, -3), (1000, 7), (1000, 0)];
        let (long, bearings) = compact(&metrics);
        assert_eq!(expand(&long, &bearings, metrics.len()), metrics);
    }

    #[test]
    fn test_compact_empty() {
        assert_eq!(compact(&[]), (Vec::new(), Vec::new()));
    }
}
