//! Build every requested variant.

use std::time::Instant;

use anyhow::{Result, bail};
use log::info;

use hanmono_core::build_all;

use crate::cli::BuildArgs;

pub fn build(args: &BuildArgs) -> Result<()> {
    let config = args.config();
    let variants = args.variants(&config)?;
    if variants.is_empty() {
        bail!("No variants to build in {}", config.font_dir.display());
    }

    let names: Vec<&str> = variants.iter().map(|v| v.as_str()).collect();
    info!("Variants: {}", names.join(", "));

    let start = Instant::now();
    let result = build_all(&config, &variants);
    println!("Done in {:.2}s", start.elapsed().as_secs_f64());
    result.ok_or_bail("Build")
}
