//! Decide which auxiliary glyphs are imported and where they land
//!
//! Base glyphs keep their glyph IDs. Imported auxiliary glyphs are appended in
//! their original order, so everything in the base font that refers to glyph
//! IDs (layout, hinting, kerning) stays valid without being rewritten.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use indexmap::IndexSet;
use log::debug;
use read_fonts::{
    FontRef, TableProvider,
    tables::{glyf::Glyph as ReadGlyph, post::Post},
};

use crate::{
    MergeError, Result,
    options::Options,
    scale::Scale,
    tables::cmap::read_mappings,
    types::{Codepoint, GlyphId, GlyphName, MegaGlyphId, Source},
};

/// The merged glyph order and the codepoint mapping that goes with it
#[derive(Debug, Clone)]
pub struct MergePlan {
    names: Vec<GlyphName>,
    base_glyphs: u16,
    imported: Vec<GlyphId>,
    aux_to_mega: HashMap<GlyphId, MegaGlyphId>,
    cmap: BTreeMap<Codepoint, MegaGlyphId>,
    added_codepoints: usize,
    scale: Scale,
}

impl MergePlan {
    pub fn compute(base: &FontRef, aux: &FontRef, options: &Options) -> Result<Self> {
        let base_names = glyph_names(base);
        let aux_names = glyph_names(aux);
        let base_cmap = read_mappings(base, Source::Base)?;
        let aux_cmap = read_mappings(aux, Source::Aux)?;

        let new_codepoints: Vec<(Codepoint, GlyphId)> = aux_cmap
            .iter()
            .filter(|(cp, _)| !base_cmap.contains_key(cp))
            .map(|(cp, gid)| (*cp, *gid))
            .collect();

        let mut seeds: Vec<GlyphId> = new_codepoints.iter().map(|(_, gid)| *gid).collect();

        if options.include_unencoded {
            let encoded: HashSet<GlyphId> = aux_cmap.values().copied().collect();
            let known: HashSet<&str> = base_names.iter().map(|n| n.as_str()).collect();
            seeds.extend(
                aux_names
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(gid, name)| (GlyphId::new(gid as u16), name))
                    .filter(|(gid, name)| !encoded.contains(gid) && !known.contains(name.as_str()))
                    .map(|(gid, _)| gid),
            );
        }

        let imported = component_closure(aux, seeds, aux_names.len())?;

        let total = base_names.len() + imported.len();
        if total > u16::MAX as usize {
            return Err(MergeError::TooManyGlyphs(total));
        }

        let base_glyphs = base_names.len() as u16;
        let mut taken: IndexSet<GlyphName> = IndexSet::with_capacity(total);
        let mut names: Vec<GlyphName> = Vec::with_capacity(total);
        for name in &base_names {
            let name = disambiguate(name, &taken);
            taken.insert(name.clone());
            names.push(name);
        }

        let mut aux_to_mega = HashMap::with_capacity(imported.len());
        for (i, gid) in imported.iter().enumerate() {
            let original = aux_names
                .get(gid.to_u16() as usize)
                .cloned()
                .unwrap_or_else(|| fallback_name(gid.to_u16()));
            let name = disambiguate(&original, &taken);
            taken.insert(name.clone());
            names.push(name);
            aux_to_mega.insert(*gid, MegaGlyphId::new(base_glyphs + i as u16));
        }

        let mut cmap: BTreeMap<Codepoint, MegaGlyphId> = base_cmap
            .iter()
            .map(|(cp, gid)| (*cp, MegaGlyphId::new(gid.to_u16())))
            .collect();
        for (cp, gid) in &new_codepoints {
            if let Some(mega) = aux_to_mega.get(gid) {
                cmap.insert(*cp, *mega);
            }
        }

        let scale = Scale::new(base.head()?.units_per_em(), aux.head()?.units_per_em());

        debug!(
            "Plan: {} base glyphs, {} imported glyphs, {} new codepoints, scale {:.4}",
            base_glyphs,
            imported.len(),
            new_codepoints.len(),
            scale.factor()
        );

        Ok(Self {
            names,
            base_glyphs,
            imported,
            aux_to_mega,
            cmap,
            added_codepoints: new_codepoints.len(),
            scale,
        })
    }

    /// Glyph names in merged glyph order
    pub fn names(&self) -> &[GlyphName] {
        &self.names
    }

    pub fn total_glyphs(&self) -> u16 {
        self.names.len() as u16
    }

    pub fn base_glyphs(&self) -> u16 {
        self.base_glyphs
    }

    /// Auxiliary glyph IDs in the order they are appended
    pub fn imported(&self) -> &[GlyphId] {
        &self.imported
    }

    /// Merged glyph ID of an imported auxiliary glyph
    pub fn aux_gid(&self, gid: GlyphId) -> Option<MegaGlyphId> {
        self.aux_to_mega.get(&gid).copied()
    }

    /// Merged codepoint mapping
    pub fn cmap(&self) -> &BTreeMap<Codepoint, MegaGlyphId> {
        &self.cmap
    }

    /// Number of codepoints contributed by the auxiliary font
    pub fn added_codepoints(&self) -> usize {
        self.added_codepoints
    }

    /// Scale from auxiliary units into base units
    pub fn scale(&self) -> Scale {
        self.scale
    }
}

/// Extend the seed glyphs with every component they reference, recursively
///
/// `.notdef` and out-of-range IDs are never imported. The result is sorted so
/// imported glyphs keep their relative order from the auxiliary font.
fn component_closure(
    aux: &FontRef,
    seeds: Vec<GlyphId>,
    num_glyphs: usize,
) -> Result<Vec<GlyphId>> {
    let glyf = aux.glyf().map_err(|_| MergeError::UnsupportedOutlines(Source::Aux))?;
    let loca = aux.loca(None)?;

    let mut seen: BTreeSet<GlyphId> = BTreeSet::new();
    let mut pending = seeds;

    while let Some(gid) = pending.pop() {
        if gid.to_u16() == 0 || gid.to_u16() as usize >= num_glyphs || !seen.insert(gid) {
            continue;
        }
        if let Ok(Some(ReadGlyph::Composite(composite))) =
            loca.get_glyf(read_fonts::types::GlyphId::new(gid.to_u32()), &glyf)
        {
            pending.extend(composite.components().map(|c| GlyphId::new(c.glyph.to_u32() as u16)));
        }
    }

    Ok(seen.into_iter().collect())
}

/// First free spelling of `name`: itself, then `name.1`, `name.2`, ...
fn disambiguate(name: &GlyphName, taken: &IndexSet<GlyphName>) -> GlyphName {
    if !taken.contains(name) {
        return name.clone();
    }
    (1..)
        .map(|i| name.with_suffix(i))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.clone())
}

fn fallback_name(gid: u16) -> GlyphName {
    GlyphName::new(format!("glyph{gid:05}"))
}

/// Glyph names from the `post` table, synthesized where missing
pub fn glyph_names(font: &FontRef) -> Vec<GlyphName> {
    let num_glyphs = font.maxp().map(|m| m.num_glyphs()).unwrap_or_default();
    let post = font.post().ok();

    (0..num_glyphs)
        .map(|gid| {
            post.as_ref()
                .and_then(|p| post_name(p, gid))
                .map(GlyphName::new)
                .unwrap_or_else(|| fallback_name(gid))
        })
        .collect()
}

fn post_name(post: &Post, gid: u16) -> Option<String> {
    post.glyph_name(read_fonts::types::GlyphId16::new(gid))
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disambiguate() {
        let taken: IndexSet<GlyphName> =
            ["A", "A.1", "B"].into_iter().map(GlyphName::new).collect();
        assert_eq!(disambiguate(&GlyphName::new("A"), &taken).as_str(), "A.2");
        assert_eq!(disambiguate(&GlyphName::new("B"), &taken).as_str(), "B.1");
        assert_eq!(disambiguate(&GlyphName::new("C"), &taken).as_str(), "C");
    }
}
