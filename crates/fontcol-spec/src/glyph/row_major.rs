//! Format C: fixed 8 × 16 glyph stored as sixteen row bytes.

use std::fmt;

use super::GlyphShape;

/// Number of source rows.
pub const ROWS: usize = 16;

/// Number of columns (bits per row byte).
pub const COLUMNS: usize = 8;

/// A glyph stored row-major, top row first, MSB = leftmost column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMajorGlyph {
    bitmap: [u8; ROWS],
}

impl RowMajorGlyph {
    pub fn new(bitmap: [u8; ROWS]) -> Self {
        Self { bitmap }
    }

    pub fn bitmap(&self) -> &[u8; ROWS] {
        &self.bitmap
    }

    /// Transposes into one `[lower, upper]` byte pair per column.
    ///
    /// `lower` holds rows 0..8 and `upper` rows 8..16, with row `r` on bit
    /// `r % 8`.
    pub fn columns(&self) -> [[u8; 2]; COLUMNS] {
        let mut columns = [[0u8; 2]; COLUMNS];
        for (row, byte) in self.bitmap.iter().enumerate() {
            for (col, pair) in columns.iter_mut().enumerate() {
                let bit = (byte >> (7 - col)) & 1;
                pair[row / 8] |= bit << (row % 8);
            }
        }
        columns
    }

    /// Columns combined into 16-bit words, `(upper << 8) | lower`.
    pub fn combined_columns(&self) -> [u16; COLUMNS] {
        combine(&self.columns())
    }

    /// Rebuilds the row-major bitmap from combined column words.
    pub fn from_combined_columns(columns: &[u16; COLUMNS]) -> Self {
        let mut bitmap = [0u8; ROWS];
        for (col, word) in columns.iter().enumerate() {
            for (row, byte) in bitmap.iter_mut().enumerate() {
                let bit = ((word >> row) & 1) as u8;
                *byte |= bit << (7 - col);
            }
        }
        Self { bitmap }
    }

    /// Source pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x as usize >= COLUMNS {
            return false;
        }
        self.bitmap
            .get(y as usize)
            .is_some_and(|row| (row >> (7 - x)) & 1 == 1)
    }
}

/// Combines `[lower, upper]` pairs into 16-bit words.
pub fn combine(pairs: &[[u8; 2]; COLUMNS]) -> [u16; COLUMNS] {
    let mut words = [0u16; COLUMNS];
    for (word, pair) in words.iter_mut().zip(pairs) {
        *word = (u16::from(pair[1]) << 8) | u16::from(pair[0]);
    }
    words
}

impl GlyphShape for RowMajorGlyph {
    const MAX_WIDTH: u32 = 8;
    const MAX_HEIGHT: u32 = 16;

    fn height(&self) -> u32 {
        Self::MAX_HEIGHT
    }

    fn width(&self) -> u32 {
        Self::MAX_WIDTH
    }
}

impl fmt::Display for RowMajorGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bitmap: Vec<String> = self.bitmap.iter().map(|b| format!("0x{:02x}", b)).collect();
        write!(f, "RowMajorGlyph([{}])", bitmap.join(", "))
    }
}
