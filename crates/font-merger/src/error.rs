use std::{io, result};

use read_fonts::ReadError;
use thiserror::Error;
use write_fonts::{BuilderError, error};

use crate::types::Source;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("failed to read font: {0}")]
    ReadError(#[from] ReadError),

    #[error("failed to write font: {0}")]
    WriteError(#[from] error::Error),

    #[error("failed to build font: {0}")]
    BuilderError(#[from] BuilderError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no fonts provided for merging")]
    NoFonts,

    #[error("expected a base font and an auxiliary font, got {0} fonts")]
    WrongFontCount(usize),

    #[error("{0} font has no TrueType outlines (CFF fonts are not supported)")]
    UnsupportedOutlines(Source),

    #[error("{0} font is a variable font")]
    VariableFont(Source),

    #[error("required table '{table}' not found in {font} font")]
    MissingTable { table: &'static str, font: Source },

    #[error("merged font would have {0} glyphs, the limit is 65535")]
    TooManyGlyphs(usize),
}

pub type Result<T> = result::Result<T, MergeError>;
