//! Describe fonts.

use std::path::PathBuf;

use anyhow::{Result, bail};

use hanmono_core::{FontFile, describe_font};

pub fn inspect(files: &[PathBuf]) -> Result<()> {
    let mut failed = 0;
    for path in files {
        let summary = FontFile::new(path).read().and_then(|data| describe_font(&data));
        match summary {
            Ok(summary) => println!("{}:\n{summary}", path.display()),
            Err(e) => {
                eprintln!("{}: {e:#}", path.display());
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("Inspect failed for {failed} of {} files", files.len());
    }
    Ok(())
}
