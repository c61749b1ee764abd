//! CLI command implementations.

mod build;
mod inspect;
mod merge;

pub use build::build;
pub use inspect::inspect;
pub use merge::merge;
