//! Descriptor parse errors.

use fontcol_spec::{BackendError, GlyphError};
use thiserror::Error;

/// Fatal errors raised while reading a descriptor.
///
/// Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// A glyph block lacks a required keyword line.
    #[error("line {line}: glyph block is missing {keyword}")]
    MissingKeyword { line: usize, keyword: &'static str },

    /// A field could not be parsed.
    #[error("line {line}: invalid {what}: '{text}'")]
    InvalidValue {
        line: usize,
        what: &'static str,
        text: String,
    },

    /// The PXF header declared no glyphs.
    #[error("num_glyphs must be > 0, got {found}")]
    NoGlyphs { found: u32 },

    /// The file ended in the middle of the data.
    #[error("line {line}: unexpected end of file, expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// A MEM block ended before all rows were read.
    #[error("line {line}: block for 0x{codepoint:02x} has {rows} rows, expected {expected}")]
    ShortBlock {
        line: usize,
        codepoint: u32,
        rows: usize,
        expected: usize,
    },

    /// The glyph record could not be represented by its format.
    #[error("line {line}: glyph 0x{codepoint:02x}: {source}")]
    Glyph {
        line: usize,
        codepoint: u32,
        #[source]
        source: GlyphError,
    },
}

impl DescriptorError {
    pub(crate) fn invalid(line: usize, what: &'static str, text: &str) -> Self {
        DescriptorError::InvalidValue {
            line,
            what,
            text: text.trim().to_string(),
        }
    }

    /// 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            DescriptorError::MissingKeyword { line, .. }
            | DescriptorError::InvalidValue { line, .. }
            | DescriptorError::UnexpectedEof { line, .. }
            | DescriptorError::ShortBlock { line, .. }
            | DescriptorError::Glyph { line, .. } => Some(*line),
            DescriptorError::NoGlyphs { .. } => None,
        }
    }
}

impl BackendError for DescriptorError {
    fn code(&self) -> &'static str {
        match self {
            DescriptorError::MissingKeyword { .. } => "DESC_001",
            DescriptorError::InvalidValue { .. } => "DESC_002",
            DescriptorError::NoGlyphs { .. } => "DESC_003",
            DescriptorError::UnexpectedEof { .. } => "DESC_004",
            DescriptorError::ShortBlock { .. } => "DESC_005",
            DescriptorError::Glyph { .. } => "DESC_006",
        }
    }

    fn category(&self) -> &'static str {
        "descriptor"
    }
}
