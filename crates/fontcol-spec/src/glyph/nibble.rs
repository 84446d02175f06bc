//! Format A: fixed 4 × 6 cell, one nibble-packed byte per source row.

use std::fmt;

use super::{GlyphError, GlyphShape};

/// Bounding box as declared by a BDF `BBX` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: i32,
    pub height: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl BoundingBox {
    pub fn new(width: i32, height: i32, x_offset: i32, y_offset: i32) -> Self {
        Self {
            width,
            height,
            x_offset,
            y_offset,
        }
    }
}

/// A glyph whose rows carry pixel data in the high nibble only.
///
/// Rows are stored top first. Fewer than six rows are bottom-aligned in
/// the cell when transposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNibbleGlyph {
    swidth: (i32, i32),
    dwidth: (i32, i32),
    bbx: BoundingBox,
    bitmap: Vec<u8>,
}

impl FixedNibbleGlyph {
    /// Number of columns in the cell.
    pub const COLUMNS: usize = 4;
    /// Number of rows in the cell.
    pub const ROWS: usize = 6;

    /// Creates a glyph, rejecting bitmaps taller than the cell.
    pub fn new(
        swidth: (i32, i32),
        dwidth: (i32, i32),
        bbx: BoundingBox,
        bitmap: Vec<u8>,
    ) -> Result<Self, GlyphError> {
        if bitmap.len() > Self::ROWS {
            return Err(GlyphError::TooManyRows {
                rows: bitmap.len(),
                max: Self::ROWS,
            });
        }
        Ok(Self {
            swidth,
            dwidth,
            bbx,
            bitmap,
        })
    }

    pub fn swidth(&self) -> (i32, i32) {
        self.swidth
    }

    pub fn dwidth(&self) -> (i32, i32) {
        self.dwidth
    }

    pub fn bbx(&self) -> BoundingBox {
        self.bbx
    }

    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Transposes the rows into up to four column masks.
    ///
    /// Bit `n` of a column is cell row `n`, counted from the top of the
    /// six-row cell. Trailing blank column pairs are trimmed, leaving at
    /// least two columns; a fully blank glyph keeps all four.
    pub fn columns(&self) -> Vec<u8> {
        let mut columns = vec![0u8; Self::COLUMNS];
        let offset = Self::ROWS - self.bitmap.len();

        for (row, byte) in self.bitmap.iter().enumerate() {
            let nibble = byte >> 4;
            for (col, column) in columns.iter_mut().enumerate() {
                let bit = (nibble >> (3 - col)) & 1;
                *column |= bit << (row + offset);
            }
        }

        if columns.iter().any(|&c| c != 0) {
            while columns.len() >= 2
                && columns[columns.len() - 1] == 0
                && columns[columns.len() - 2] == 0
            {
                columns.pop();
            }
        }
        columns
    }

    /// Source pixel at column `x`, row `y` (top-left origin).
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x as usize >= Self::COLUMNS {
            return false;
        }
        self.bitmap
            .get(y as usize)
            .is_some_and(|row| (row >> (7 - x)) & 1 == 1)
    }
}

impl GlyphShape for FixedNibbleGlyph {
    const MAX_WIDTH: u32 = 4;
    const MAX_HEIGHT: u32 = 6;

    fn height(&self) -> u32 {
        (self.bbx.height - self.bbx.y_offset + 1).max(0) as u32
    }

    fn width(&self) -> u32 {
        self.dwidth.0.max(0) as u32
    }
}

impl fmt::Display for FixedNibbleGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bitmap: Vec<String> = self.bitmap.iter().map(|b| format!("0x{:02x}", b)).collect();
        write!(
            f,
            "FixedNibbleGlyph(({}, {}), ({}, {}), ({}, {}, {}, {}), [{}])",
            self.swidth.0,
            self.swidth.1,
            self.dwidth.0,
            self.dwidth.1,
            self.bbx.width,
            self.bbx.height,
            self.bbx.x_offset,
            self.bbx.y_offset,
            bitmap.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(bitmap: &[u8]) -> FixedNibbleGlyph {
        FixedNibbleGlyph::new(
            (500, 0),
            (4, 0),
            BoundingBox::new(3, bitmap.len() as i32, 0, 0),
            bitmap.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn test_full_height_vertical_bar() {
        // Leftmost column lit in every row.
        let g = glyph(&[0x80; 6]);
        assert_eq!(g.columns(), vec![0x3F, 0x00]);
    }

    #[test]
    fn test_short_glyph_is_bottom_aligned() {
        // Two rows: top row lights column 1, bottom row column 2.
        let g = glyph(&[0x40, 0x20]);
        // offset = 4, so rows land on bits 4 and 5.
        assert_eq!(g.columns(), vec![0x00, 0x10, 0x20, 0x00]);
    }

    #[test]
    fn test_trailing_blank_pairs_trimmed() {
        let g = glyph(&[0x80, 0x80, 0x80]);
        assert_eq!(g.columns(), vec![0x38, 0x00]);
    }

    #[test]
    fn test_single_trailing_blank_column_kept() {
        // Columns 0..=2 lit, column 3 blank: only one trailing zero, no trim.
        let g = glyph(&[0xE0; 6]);
        assert_eq!(g.columns(), vec![0x3F, 0x3F, 0x3F, 0x00]);
    }

    #[test]
    fn test_blank_glyph_keeps_four_columns() {
        let g = glyph(&[0x00, 0x00]);
        assert_eq!(g.columns(), vec![0, 0, 0, 0]);

        let empty = glyph(&[]);
        assert_eq!(empty.columns(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_low_nibble_ignored() {
        let g = glyph(&[0x0F; 6]);
        assert_eq!(g.columns(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_rejects_tall_bitmap() {
        let err = FixedNibbleGlyph::new((0, 0), (4, 0), BoundingBox::new(3, 7, 0, 0), vec![0; 7])
            .unwrap_err();
        assert!(matches!(err, GlyphError::TooManyRows { rows: 7, max: 6 }));
    }

    #[test]
    fn test_metrics() {
        let g = FixedNibbleGlyph::new(
            (500, 0),
            (4, 0),
            BoundingBox::new(3, 5, 0, -1),
            vec![0; 5],
        )
        .unwrap();
        assert_eq!(g.height(), 7);
        assert_eq!(g.width(), 4);
    }

    #[test]
    fn test_display() {
        let g = FixedNibbleGlyph::new((500, 0), (4, 0), BoundingBox::new(1, 2, 1, 0), vec![0x40, 0x4a])
            .unwrap();
        assert_eq!(
            g.to_string(),
            "FixedNibbleGlyph((500, 0), (4, 0), (1, 2, 1, 0), [0x40, 0x4a])"
        );
    }
}
