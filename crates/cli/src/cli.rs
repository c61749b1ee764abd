//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use hanmono_core::{
    BuildConfig, Options, Variant,
    config::{
        AUX_FONT_PREFIX, BASE_FONT_PREFIX, DEFAULT_FONT_DIR, DEFAULT_VARIANTS, OUTPUT_FONT_PREFIX,
    },
    discover_variants,
};

use crate::commands::{build, inspect, merge};

#[derive(Parser)]
#[command(name = "hanmono")]
#[command(about = "Merge a Latin monospace font with a CJK monospace font, one weight at a time")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    /// Directory holding the input fonts
    #[arg(long, default_value = DEFAULT_FONT_DIR)]
    pub font_dir: PathBuf,
    /// Output directory [default: the font directory]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Variants to build [default: Light,Medium,Regular]
    #[arg(long, value_delimiter = ',', conflicts_with = "auto")]
    pub variants: Vec<String>,
    /// Build every variant that has both a base and an auxiliary font
    #[arg(long)]
    pub auto: bool,
    #[arg(long, default_value = BASE_FONT_PREFIX)]
    pub base_prefix: String,
    #[arg(long, default_value = AUX_FONT_PREFIX)]
    pub aux_prefix: String,
    #[arg(long, default_value = OUTPUT_FONT_PREFIX)]
    pub output_prefix: String,
    /// Also import auxiliary glyphs no codepoint maps to
    #[arg(long)]
    pub include_unencoded: bool,
}

impl BuildArgs {
    pub fn config(&self) -> BuildConfig {
        BuildConfig {
            font_dir: self.font_dir.clone(),
            output_dir: self.output_dir.clone().unwrap_or_else(|| self.font_dir.clone()),
            base_prefix: self.base_prefix.clone(),
            aux_prefix: self.aux_prefix.clone(),
            output_prefix: self.output_prefix.clone(),
            merge_options: Options::new().include_unencoded(self.include_unencoded),
            ..BuildConfig::default()
        }
    }

    pub fn variants(&self, config: &BuildConfig) -> Result<Vec<Variant>> {
        if self.auto {
            return discover_variants(config);
        }
        if self.variants.is_empty() {
            return Ok(DEFAULT_VARIANTS.iter().copied().map(Variant::from).collect());
        }
        Ok(self.variants.iter().map(|v| Variant::new(v.trim())).collect())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge, rename and write every variant
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Merge two fonts without touching their names
    Merge {
        /// Base font; its glyphs win
        base: PathBuf,
        /// Auxiliary font providing the missing characters
        aux: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Tables to leave out of the merged font
        #[arg(long, value_delimiter = ',')]
        drop_tables: Vec<String>,
        #[arg(long)]
        include_unencoded: bool,
    },
    /// Print names, weight and coverage of fonts
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => {
                build(&args)?;
            }
            Commands::Merge { base, aux, output, drop_tables, include_unencoded } => {
                let options =
                    Options::new().drop_tables(&drop_tables).include_unencoded(include_unencoded);
                merge(&base, &aux, &output, options)?;
            }
            Commands::Inspect { files } => {
                inspect(&files)?;
            }
        }
        Ok(())
    }
}
