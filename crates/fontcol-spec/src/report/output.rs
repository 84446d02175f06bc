//! Output artifact entries for reports.

use serde::{Deserialize, Serialize};

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputResult {
    /// Path relative to the output root.
    pub path: String,
    /// Hex BLAKE3 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Table statistics.
    pub table: TableMetrics,
}

/// Shape and size of an emitted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TableMetrics {
    /// Column blob plus offset index.
    Variable {
        glyph_count: usize,
        blob_len: usize,
        /// Bit width of the emitted index elements (8 or 16).
        index_bits: u8,
    },
    /// Fixed rows of 16-bit columns.
    Fixed {
        glyph_count: usize,
        columns_per_glyph: usize,
    },
}

impl OutputResult {
    /// Creates an output entry.
    pub fn new(path: impl Into<String>, hash: impl Into<String>, size_bytes: u64, table: TableMetrics) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
            size_bytes,
            table,
        }
    }
}
