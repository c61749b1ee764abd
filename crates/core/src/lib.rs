//! hanmono core: build pipeline for merged Latin/CJK monospace fonts.

pub mod config;
pub mod inspect;
pub mod io;
pub mod parallel;
pub mod pipeline;

pub use hanmono_font_merger::{MergeReport, Merger, Options};
pub use hanmono_font_metadata::{NamingScheme, Variant, apply_metadata};
pub use inspect::{FontSummary, describe_font};
pub use io::{FontFile, glob_fonts};
pub use parallel::{BatchResult, process_parallel_iter};
pub use pipeline::{
    BuildConfig, VariantPaths, build_all, build_variant, default_scheme, discover_variants,
};
