//! Merge two fonts as they are.

use std::path::Path;

use anyhow::{Context, Result};

use hanmono_core::{FontFile, Merger, Options};

pub fn merge(base: &Path, aux: &Path, output: &Path, options: Options) -> Result<()> {
    println!("Merging {} into {}", aux.display(), base.display());

    let base_data = FontFile::new(base).read()?;
    let aux_data = FontFile::new(aux).read()?;

    let (merged, report) = Merger::new(options)
        .merge_with_report(&[base_data.as_slice(), aux_data.as_slice()])
        .context("Failed to merge fonts")?;

    FontFile::new(output).write(&merged)?;

    let output_size = merged.len() as f64 / 1024.0 / 1024.0;
    println!(
        "Merged font: {} ({} + {} glyphs, {} new codepoints, {output_size:.2} MB)",
        output.display(),
        report.base_glyphs,
        report.imported_glyphs,
        report.added_codepoints
    );

    Ok(())
}
