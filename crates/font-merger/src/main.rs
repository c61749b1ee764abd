use std::{
    fs::{read, write},
    path::PathBuf,
};

use clap::Parser;
use hanmono_font_merger::{Merger, Options, Result};

#[derive(Parser)]
#[command(name = "hanmono-merge")]
#[command(about = "Merge the glyphs of an auxiliary font into a base font", long_about = None)]
struct Cli {
    /// Base font; its glyphs are never replaced
    base: PathBuf,

    /// Auxiliary font providing the missing glyphs
    aux: PathBuf,

    /// Output font file
    #[arg(short, long, default_value = "merged.ttf")]
    output: PathBuf,

    /// Comma-separated list of tables to drop
    #[arg(long, value_delimiter = ',')]
    drop_tables: Vec<String>,

    /// Also import auxiliary glyphs no codepoint maps to
    #[arg(long)]
    include_unencoded: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base = read(&cli.base)?;
    let aux = read(&cli.aux)?;

    let options = Options::new()
        .drop_tables(cli.drop_tables)
        .include_unencoded(cli.include_unencoded)
        .verbose(cli.verbose);

    let (merged, report) =
        Merger::new(options).merge_with_report(&[base.as_slice(), aux.as_slice()])?;
    write(&cli.output, &merged)?;

    if cli.verbose {
        eprintln!(
            "Imported {} glyphs for {} codepoints, wrote {} bytes to {}",
            report.imported_glyphs,
            report.added_codepoints,
            merged.len(),
            cli.output.display()
        );
    } else {
        println!("{}", cli.output.display());
    }

    Ok(())
}
