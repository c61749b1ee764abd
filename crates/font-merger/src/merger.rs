//! Main Merger implementation

use std::collections::HashSet;

use log::{debug, info};
use read_fonts::{FontRef, TableProvider, types::Tag};
use write_fonts::FontBuilder;

use crate::{
    MergeError, Result,
    options::Options,
    plan::MergePlan,
    tables::{
        cmap::build_cmap, glyf::merge_glyf, head::merge_head, hint::check_hint_compatibility,
        hmtx::merge_horizontal, maxp::merge_maxp, os2::merge_os2, post::merge_post,
        vmtx::merge_vertical,
    },
    types::Source,
};

/// Tables rebuilt by the merger
const HANDLED_TABLES: &[[u8; 4]] = &[
    *b"head", *b"maxp", *b"cmap", *b"hmtx", *b"hhea", *b"post", *b"OS/2", *b"vhea", *b"vmtx",
    *b"glyf", *b"loca",
];

/// Base tables that would be stale after glyphs are appended
const STALE_TABLES: &[[u8; 4]] = &[*b"hdmx", *b"LTSH", *b"VORG", *b"DSIG"];

/// What a merge did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub base_glyphs: u16,
    pub imported_glyphs: u16,
    pub added_codepoints: usize,
}

/// Merges an auxiliary font into a base font
///
/// Characters already in the base font are not replaced.
#[derive(Debug, Default)]
pub struct Merger {
    options: Options,
}

impl Merger {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Merge `[base, aux]` font files
    pub fn merge(&self, font_data: &[&[u8]]) -> Result<Vec<u8>> {
        self.merge_with_report(font_data).map(|(data, _)| data)
    }

    /// Merge `[base, aux]` font files and report what was imported
    pub fn merge_with_report(&self, font_data: &[&[u8]]) -> Result<(Vec<u8>, MergeReport)> {
        match font_data {
            [] => Err(MergeError::NoFonts),
            [base, aux] => {
                let base = FontRef::new(base)?;
                let aux = FontRef::new(aux)?;
                self.merge_fonts(&base, &aux)
            }
            other => Err(MergeError::WrongFontCount(other.len())),
        }
    }

    /// Merge two parsed fonts
    pub fn merge_fonts(&self, base: &FontRef, aux: &FontRef) -> Result<(Vec<u8>, MergeReport)> {
        validate(base, Source::Base)?;
        validate(aux, Source::Aux)?;

        check_hint_compatibility(base, aux, self.options.keep_aux_hinting);

        let plan = MergePlan::compute(base, aux, &self.options)?;
        let report = MergeReport {
            base_glyphs: plan.base_glyphs(),
            imported_glyphs: plan.imported().len() as u16,
            added_codepoints: plan.added_codepoints(),
        };

        info!(
            "Merging {} auxiliary glyphs ({} codepoints) into {} base glyphs",
            report.imported_glyphs, report.added_codepoints, report.base_glyphs
        );

        let (glyf, loca, loca_format) = merge_glyf(base, aux, &plan, &self.options)?;
        let head = merge_head(base, aux, plan.scale(), loca_format)?;
        let maxp =
            merge_maxp(base, aux, plan.total_glyphs(), self.options.keep_aux_hinting)?;
        let (hmtx, hhea) = merge_horizontal(base, aux, &plan)?;
        let vertical = merge_vertical(base, aux, &plan)?;
        let post = merge_post(base, plan.names())?;
        let os2 = merge_os2(base, aux, plan.cmap());
        let cmap = build_cmap(plan.cmap());

        let mut builder = FontBuilder::new();
        builder.add_table(&head)?;
        builder.add_table(&maxp)?;
        builder.add_table(&cmap)?;
        builder.add_table(&hhea)?;
        builder.add_table(&hmtx)?;
        builder.add_table(&post)?;
        builder.add_table(&glyf)?;
        builder.add_table(&loca)?;

        if let Some(os2) = os2.filter(|_| !self.options.should_drop(Tag::new(b"OS/2"))) {
            builder.add_table(&os2)?;
        }
        if let Some((vmtx, vhea)) = vertical
            && !self.options.should_drop(Tag::new(b"vhea"))
            && !self.options.should_drop(Tag::new(b"vmtx"))
        {
            builder.add_table(&vhea)?;
            builder.add_table(&vmtx)?;
        }

        self.copy_base_tables(&mut builder, base);

        if self.options.verbose {
            info!("Merged font has {} glyphs", plan.total_glyphs());
        }

        Ok((builder.build(), report))
    }

    /// Copy every remaining base table unchanged
    ///
    /// Base glyph IDs survive the merge, so layout, kerning and hinting tables
    /// stay valid as they are.
    fn copy_base_tables(&self, builder: &mut FontBuilder, base: &FontRef) {
        let skipped: HashSet<Tag> =
            HANDLED_TABLES.iter().chain(STALE_TABLES).map(Tag::new).collect();

        for record in base.table_directory.table_records() {
            let tag = record.tag();
            if skipped.contains(&tag) || self.options.should_drop(tag) || builder.contains(tag) {
                if STALE_TABLES.iter().any(|t| Tag::new(t) == tag) {
                    debug!("Dropping stale '{tag}' table");
                }
                continue;
            }
            if let Some(data) = base.table_data(tag) {
                builder.add_raw(tag, data.as_bytes().to_vec());
            }
        }
    }
}

/// Reject fonts the merger cannot handle
fn validate(font: &FontRef, source: Source) -> Result<()> {
    if font.table_data(Tag::new(b"fvar")).is_some() {
        return Err(MergeError::VariableFont(source));
    }
    if font.table_data(Tag::new(b"glyf")).is_none()
        || font.table_data(Tag::new(b"CFF ")).is_some()
        || font.table_data(Tag::new(b"CFF2")).is_some()
    {
        return Err(MergeError::UnsupportedOutlines(source));
    }
    for (table, present) in [
        ("head", font.head().is_ok()),
        ("maxp", font.maxp().is_ok()),
        ("hhea", font.hhea().is_ok()),
        ("hmtx", font.hmtx().is_ok()),
        ("loca", font.loca(None).is_ok()),
    ] {
        if !present {
            return Err(MergeError::MissingTable { table, font: source });
        }
    }
    Ok(())
}
