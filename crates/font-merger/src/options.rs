//! Options for font merging

use read_fonts::types::Tag;

use crate::types::TableTag;

/// Options for font merging
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Tables to drop from the merged font
    pub drop_tables: Vec<TableTag>,

    /// Also import auxiliary glyphs that no codepoint maps to
    pub include_unencoded: bool,

    /// Keep per-glyph instructions of imported simple glyphs
    pub keep_aux_hinting: bool,

    /// Log per-table progress at info level
    pub verbose: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables to drop (unparseable tags are ignored)
    pub fn drop_tables(mut self, tables: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        self.drop_tables = tables.into_iter().filter_map(|s| TableTag::parse(s.as_ref())).collect();
        self
    }

    pub fn include_unencoded(mut self, include: bool) -> Self {
        self.include_unencoded = include;
        self
    }

    pub fn keep_aux_hinting(mut self, keep: bool) -> Self {
        self.keep_aux_hinting = keep;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn should_drop(&self, tag: Tag) -> bool {
        self.drop_tables.iter().any(|t| t.tag() == tag)
    }
}
