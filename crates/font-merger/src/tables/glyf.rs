//! glyf/loca construction
//!
//! Base glyphs are copied as they are, instructions included. Imported glyphs get their component
//! references remapped into the merged glyph order, are rescaled to the base
//! `unitsPerEm`, and lose their per-glyph instructions unless the options ask
//! to keep them: those instructions may call `fpgm` functions or read `cvt `
//! entries, and both tables come from the base font only.

use log::warn;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::{Anchor as ReadAnchor, CurvePoint, Glyph as ReadGlyph},
    types::GlyphId as ReadGlyphId,
};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        glyf::{
            Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour, Glyf,
            GlyfLocaBuilder, Glyph, SimpleGlyph, Transform,
        },
        loca::{Loca, LocaFormat},
    },
};

use crate::{
    MergeError, Result,
    options::Options,
    plan::MergePlan,
    scale::Scale,
    types::{GlyphId, MegaGlyphId, Source},
};

/// Build glyf and loca in merged glyph order
pub fn merge_glyf(
    base: &FontRef,
    aux: &FontRef,
    plan: &MergePlan,
    options: &Options,
) -> Result<(Glyf, Loca, LocaFormat)> {
    let mut glyphs: Vec<Glyph> = Vec::with_capacity(plan.total_glyphs() as usize);

    let base_glyf = base.glyf().map_err(|_| MergeError::UnsupportedOutlines(Source::Base))?;
    let base_loca = base.loca(None)?;
    for gid in 0..plan.base_glyphs() {
        let glyph: Glyph = match base_loca.get_glyf(ReadGlyphId::new(gid as u32), &base_glyf) {
            Ok(Some(glyph)) => glyph.to_owned_table(),
            _ => Glyph::Empty,
        };
        glyphs.push(glyph);
    }

    let aux_glyf = aux.glyf().map_err(|_| MergeError::UnsupportedOutlines(Source::Aux))?;
    let aux_loca = aux.loca(None)?;
    for gid in plan.imported() {
        let glyph = match aux_loca.get_glyf(ReadGlyphId::new(gid.to_u32()), &aux_glyf) {
            Ok(Some(glyph)) => {
                convert_glyph(&glyph, |g| plan.aux_gid(g), plan.scale(), options.keep_aux_hinting)
            }
            _ => Glyph::Empty,
        };
        glyphs.push(glyph);
    }

    empty_composites_of_empty_glyphs(&mut glyphs);

    let mut builder = GlyfLocaBuilder::new();
    for (gid, glyph) in glyphs.iter().enumerate() {
        if let Err(e) = builder.add_glyph(glyph) {
            warn!("Glyph {gid} could not be written, leaving it empty: {e}");
            builder.add_glyph(&Glyph::Empty)?;
        }
    }

    Ok(builder.build())
}

/// OTS (used by Firefox) rejects composites that reference empty glyphs
fn empty_composites_of_empty_glyphs(glyphs: &mut [Glyph]) {
    loop {
        let empty: Vec<bool> = glyphs.iter().map(|g| matches!(g, Glyph::Empty)).collect();
        let mut changed = false;

        for glyph in glyphs.iter_mut() {
            if let Glyph::Composite(composite) = glyph
                && composite
                    .components()
                    .iter()
                    .any(|c| empty.get(c.glyph.to_u16() as usize).copied().unwrap_or(true))
            {
                *glyph = Glyph::Empty;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }
}

/// Convert an imported glyph into a write-fonts glyph
///
/// `remap` maps component glyph IDs into the merged order. Components it
/// cannot map are dropped.
fn convert_glyph(
    glyph: &ReadGlyph,
    remap: impl Fn(GlyphId) -> Option<MegaGlyphId>,
    scale: Scale,
    keep_instructions: bool,
) -> Glyph {
    match glyph {
        ReadGlyph::Simple(simple) => {
            let mut contours: Vec<Contour> = Vec::new();
            let mut points = simple.points();
            let mut next_point = 0usize;

            for end_pt in simple.end_pts_of_contours() {
                let end = end_pt.get() as usize;
                let mut contour = Vec::new();
                while next_point <= end {
                    if let Some(pt) = points.next() {
                        contour.push(CurvePoint {
                            x: scale.apply(pt.x),
                            y: scale.apply(pt.y),
                            on_curve: pt.on_curve,
                        });
                    }
                    next_point += 1;
                }
                contours.push(contour.into());
            }

            let bbox = Bbox {
                x_min: scale.apply(simple.x_min()),
                y_min: scale.apply(simple.y_min()),
                x_max: scale.apply(simple.x_max()),
                y_max: scale.apply(simple.y_max()),
            };

            let instructions =
                if keep_instructions { simple.instructions().to_vec() } else { Vec::new() };

            Glyph::Simple(SimpleGlyph { bbox, contours, instructions })
        }
        ReadGlyph::Composite(composite) => {
            let mut components: Vec<Component> = composite
                .components()
                .filter_map(|comp| {
                    let new_gid = remap(GlyphId::new(comp.glyph.to_u32() as u16))?;
                    let anchor = match comp.anchor {
                        ReadAnchor::Offset { x, y } => {
                            Anchor::Offset { x: scale.apply(x), y: scale.apply(y) }
                        }
                        ReadAnchor::Point { base, component } => Anchor::Point { base, component },
                    };
                    let transform = Transform {
                        xx: comp.transform.xx,
                        yx: comp.transform.yx,
                        xy: comp.transform.xy,
                        yy: comp.transform.yy,
                    };
                    let flags: ComponentFlags = comp.flags.into();
                    Some(Component {
                        glyph: font_types::GlyphId16::new(new_gid.to_u16()),
                        anchor,
                        transform,
                        flags,
                    })
                })
                .collect();

            if components.is_empty() {
                return Glyph::Empty;
            }

            let bbox = Bbox {
                x_min: scale.apply(composite.x_min()),
                y_min: scale.apply(composite.y_min()),
                x_max: scale.apply(composite.x_max()),
                y_max: scale.apply(composite.y_max()),
            };

            let first = components.remove(0);
            let mut composite_glyph = CompositeGlyph::new(first, bbox);
            for comp in components {
                composite_glyph.add_component(comp, bbox);
            }

            Glyph::Composite(composite_glyph)
        }
    }
}

#[cfg(test)]
mod tests {
    use font_types::F2Dot14;

    use super::*;

    fn square(size: i16) -> Glyph {
        let contour: Contour = vec![
            CurvePoint { x: 0, y: 0, on_curve: true },
            CurvePoint { x: size, y: 0, on_curve: true },
            CurvePoint { x: size, y: size, on_curve: true },
        ]
        .into();
        Glyph::Simple(SimpleGlyph {
            bbox: Bbox { x_min: 0, y_min: 0, x_max: size, y_max: size },
            contours: vec![contour],
            instructions: vec![],
        })
    }

    fn composite_of(gid: u16) -> Glyph {
        let component = Component {
            glyph: font_types::GlyphId16::new(gid),
            anchor: Anchor::Offset { x: 0, y: 0 },
            transform: Transform {
                xx: F2Dot14::from_f32(1.0),
                yx: F2Dot14::from_f32(0.0),
                xy: F2Dot14::from_f32(0.0),
                yy: F2Dot14::from_f32(1.0),
            },
            flags: ComponentFlags::default(),
        };
        Glyph::Composite(CompositeGlyph::new(
            component,
            Bbox { x_min: 0, y_min: 0, x_max: 100, y_max: 100 },
        ))
    }

    #[test]
    fn test_composites_of_empty_glyphs_are_emptied() {
        let mut glyphs = vec![Glyph::Empty, square(100), composite_of(0), composite_of(2)];
        empty_composites_of_empty_glyphs(&mut glyphs);

        assert!(matches!(glyphs[1], Glyph::Simple(_)));
        assert!(matches!(glyphs[2], Glyph::Empty));
        // the chain collapses once its target became empty
        assert!(matches!(glyphs[3], Glyph::Empty));
    }

    #[test]
    fn test_composite_of_outline_is_kept() {
        let mut glyphs = vec![Glyph::Empty, square(100), composite_of(1)];
        empty_composites_of_empty_glyphs(&mut glyphs);
        assert!(matches!(glyphs[2], Glyph::Composite(_)));
    }
}
