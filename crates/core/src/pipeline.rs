//! Per-variant build pipeline.
//!
//! Each variant goes through the same four steps: read the base and auxiliary
//! fonts, merge the auxiliary glyphs into the base font, rewrite the metadata,
//! and write the result.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use log::{debug, info};

use hanmono_font_merger::{Merger, Options};
use hanmono_font_metadata::{NamingScheme, Sources, Variant, apply_metadata};

use crate::{
    config::{
        AUX_FONT_PREFIX, BASE_FONT_PREFIX, COPYRIGHT, DEFAULT_FONT_DIR, FAMILY_EN, FAMILY_ZH,
        FONT_EXTENSION, MANUFACTURER, OUTPUT_FONT_PREFIX, POSTSCRIPT_PREFIX, VENDOR_ID, VERSION,
    },
    io::{FontFile, glob_fonts},
    parallel::{BatchResult, process_parallel_iter},
};

/// The naming scheme of the LXGW WenKai + JetBrains Mono Nerd Font family
pub fn default_scheme() -> NamingScheme {
    NamingScheme {
        manufacturer: MANUFACTURER.to_string(),
        vendor_id: VENDOR_ID.to_string(),
        copyright: COPYRIGHT.to_string(),
        version: VERSION.to_string(),
        ..NamingScheme::from_parts(FAMILY_EN, FAMILY_ZH, POSTSCRIPT_PREFIX)
    }
}

/// Everything a build needs besides the variant list
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub font_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_prefix: String,
    pub aux_prefix: String,
    pub output_prefix: String,
    pub scheme: NamingScheme,
    pub merge_options: Options,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from(DEFAULT_FONT_DIR),
            output_dir: PathBuf::from(DEFAULT_FONT_DIR),
            base_prefix: BASE_FONT_PREFIX.to_string(),
            aux_prefix: AUX_FONT_PREFIX.to_string(),
            output_prefix: OUTPUT_FONT_PREFIX.to_string(),
            scheme: default_scheme(),
            merge_options: Options::default(),
        }
    }
}

impl BuildConfig {
    /// Read inputs from and write outputs to the same directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self { font_dir: dir.clone(), output_dir: dir, ..Self::default() }
    }

    fn font_path(dir: &Path, prefix: &str, variant: &Variant) -> PathBuf {
        dir.join(format!("{prefix}{variant}.{FONT_EXTENSION}"))
    }
}

/// Input and output files of one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPaths {
    pub variant: Variant,
    pub base: FontFile,
    pub aux: FontFile,
    pub output: FontFile,
}

impl VariantPaths {
    pub fn resolve(config: &BuildConfig, variant: &Variant) -> Self {
        let font_dir = &config.font_dir;
        Self {
            variant: variant.clone(),
            base: FontFile::new(BuildConfig::font_path(font_dir, &config.base_prefix, variant)),
            aux: FontFile::new(BuildConfig::font_path(font_dir, &config.aux_prefix, variant)),
            output: FontFile::new(BuildConfig::font_path(
                &config.output_dir,
                &config.output_prefix,
                variant,
            )),
        }
    }
}

/// Variants with both a base and an auxiliary font in the font directory
pub fn discover_variants(config: &BuildConfig) -> Result<Vec<Variant>> {
    let pattern = format!("{}*.{FONT_EXTENSION}", glob::Pattern::escape(&config.base_prefix));
    let suffix = format!(".{FONT_EXTENSION}");

    let mut variants = Vec::new();
    for path in glob_fonts(&config.font_dir, &pattern)? {
        let Some(variant) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix(config.base_prefix.as_str()))
            .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            .filter(|variant| !variant.is_empty())
            .map(Variant::new)
        else {
            continue;
        };

        if VariantPaths::resolve(config, &variant).aux.exists() {
            variants.push(variant);
        } else {
            debug!("Skipping {variant}: no auxiliary font");
        }
    }
    Ok(variants)
}

/// Build one variant and return the path of the generated font
pub fn build_variant(config: &BuildConfig, variant: &Variant) -> Result<PathBuf> {
    let start = Instant::now();
    let paths = VariantPaths::resolve(config, variant);

    // (a) open
    let base = paths.base.read()?;
    let aux = paths.aux.read()?;

    // (b) merge
    let merger = Merger::new(config.merge_options.clone());
    let (merged, report) = merger
        .merge_with_report(&[base.as_slice(), aux.as_slice()])
        .with_context(|| format!("Failed to merge {} into {}", paths.aux, paths.base))?;
    info!(
        "{variant}: imported {} glyphs for {} codepoints",
        report.imported_glyphs, report.added_codepoints
    );

    // (c) metadata
    let base_name = paths.base.to_string();
    let aux_name = paths.aux.to_string();
    let sources = Sources { base: &base_name, aux: &aux_name };
    let data = apply_metadata(&merged, &config.scheme, variant, Some(sources))
        .with_context(|| format!("Failed to set metadata for {variant}"))?;

    // (d) generate
    paths.output.write(&data)?;
    debug!("{variant}: {} bytes in {:.2}s", data.len(), start.elapsed().as_secs_f64());
    println!("Generated: {}", paths.output);

    Ok(paths.output.path().to_path_buf())
}

/// Build every variant in parallel.
///
/// A failing variant is reported and does not stop the others; check the
/// returned [`BatchResult`] to fail the run as a whole.
pub fn build_all(config: &BuildConfig, variants: &[Variant]) -> BatchResult {
    info!("Building {} variants into {}", variants.len(), config.output_dir.display());
    process_parallel_iter("Build", variants, |variant| build_variant(config, variant))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_default_scheme() {
        let scheme = default_scheme();
        assert_eq!(scheme.family_en, "LXWenKai JetBr Nerd Mono");
        assert_eq!(scheme.family_zh, "霞鹜文楷 JetBrains 等宽");
        assert_eq!(scheme.postscript_name(&Variant::new("Light")), "LXWenKaiJetBrMonoNF-Light");
        assert_eq!(scheme.vendor_id, "LXGW");
        assert_eq!(scheme.version, "1.0");
    }

    #[test]
    fn test_resolve_paths() {
        let config = BuildConfig {
            output_dir: PathBuf::from("out"),
            ..BuildConfig::in_dir("fonts")
        };
        let paths = VariantPaths::resolve(&config, &Variant::new("Medium"));

        assert_eq!(paths.base.path(), Path::new("fonts/JetBrainsMonoNerdFontMono-Medium.ttf"));
        assert_eq!(paths.aux.path(), Path::new("fonts/LXGWWenKaiMono-Medium.ttf"));
        assert_eq!(paths.output.path(), Path::new("out/LXWenKaiJetBrMonoNF-Medium.ttf"));
    }

    #[test]
    fn test_discover_variants() {
        let dir = tempdir().unwrap();
        for name in [
            "JetBrainsMonoNerdFontMono-Light.ttf",
            "JetBrainsMonoNerdFontMono-Bold.ttf",
            "JetBrainsMonoNerdFontMono-Regular.ttf",
            "LXGWWenKaiMono-Light.ttf",
            "LXGWWenKaiMono-Regular.ttf",
            "LXGWWenKaiMono-Medium.ttf",
        ] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let variants = discover_variants(&BuildConfig::in_dir(dir.path())).unwrap();
        assert_eq!(variants, vec![Variant::new("Light"), Variant::new("Regular")]);
    }

    #[test]
    fn test_build_variant_missing_input() {
        let dir = tempdir().unwrap();
        let config = BuildConfig::in_dir(dir.path());
        let err = build_variant(&config, &Variant::new("Light")).unwrap_err();
        assert!(format!("{err}").contains("JetBrainsMonoNerdFontMono-Light.ttf"));
    }

    #[test]
    fn test_build_all_counts_failures() {
        let dir = tempdir().unwrap();
        let config = BuildConfig::in_dir(dir.path());
        let variants = vec![Variant::new("Light"), Variant::new("Medium")];
        let result = build_all(&config, &variants);
        assert_eq!(result, BatchResult { succeeded: 0, failed: 2 });
        assert!(result.ok_or_bail("Build").is_err());
    }
}
