//! Format B: variable-width glyph described by a sparse pixel list.

use std::fmt;

use super::{GlyphError, GlyphShape};
use crate::error::{Encoded, ValidationWarning, WarningCode};

/// Highest addressable row. The cell is nominally 8 rows tall, but the
/// row-to-bit mapping `6 - y` only reaches rows 0..=6.
pub const MAX_PIXEL_ROW: u32 = 6;

/// Widest advance a glyph may declare.
pub const MAX_ADVANCE: u32 = u8::MAX as u32;

/// A glyph given as a set of lit `(x, y)` coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparsePixelGlyph {
    advance: u32,
    auto_update_advance: bool,
    auto_advance_amount: i32,
    pixels: Vec<(u32, u32)>,
}

impl SparsePixelGlyph {
    /// Creates a glyph, rejecting pixels below the addressable rows and
    /// advances above [`MAX_ADVANCE`].
    ///
    /// Pixels with `x >= advance` are accepted here; they are reported as
    /// warnings when the glyph is transposed.
    pub fn new(
        advance: u32,
        auto_update_advance: bool,
        auto_advance_amount: i32,
        pixels: Vec<(u32, u32)>,
    ) -> Result<Self, GlyphError> {
        if advance > MAX_ADVANCE {
            return Err(GlyphError::AdvanceTooLarge {
                advance,
                max: MAX_ADVANCE,
            });
        }
        if let Some(&(x, y)) = pixels.iter().find(|&&(_, y)| y > MAX_PIXEL_ROW) {
            return Err(GlyphError::RowOutOfRange {
                x,
                y,
                max: MAX_PIXEL_ROW,
            });
        }
        Ok(Self {
            advance,
            auto_update_advance,
            auto_advance_amount,
            pixels,
        })
    }

    pub fn advance(&self) -> u32 {
        self.advance
    }

    pub fn auto_update_advance(&self) -> bool {
        self.auto_update_advance
    }

    pub fn auto_advance_amount(&self) -> i32 {
        self.auto_advance_amount
    }

    pub fn pixels(&self) -> &[(u32, u32)] {
        &self.pixels
    }

    /// Transposes the pixel list into `advance` column masks.
    ///
    /// Row `y` lands on bit `6 - y`, so bit 7 is never set. A pixel whose
    /// x is not below `advance` raises [`WarningCode::PixelOutsideAdvance`]
    /// and is left out of the columns.
    pub fn columns(&self) -> Encoded<Vec<u8>> {
        let mut pixels = self.pixels.clone();
        pixels.sort_unstable();

        let mut warnings = Vec::new();
        if let Some(&(max_x, _)) = pixels.last() {
            if max_x >= self.advance {
                let outside: Vec<String> = pixels
                    .iter()
                    .filter(|&&(x, _)| x >= self.advance)
                    .map(|(x, y)| format!("({}, {})", x, y))
                    .collect();
                warnings.push(ValidationWarning::new(
                    WarningCode::PixelOutsideAdvance,
                    format!(
                        "glyph has advance {} but pixel x reaches {}; dropped {}",
                        self.advance,
                        max_x,
                        outside.join(", ")
                    ),
                ));
            }
        }

        let mut columns = vec![0u8; self.advance as usize];
        for &(x, y) in &pixels {
            if let Some(column) = columns.get_mut(x as usize) {
                *column |= 1 << (MAX_PIXEL_ROW - y);
            }
        }

        Encoded::with_warnings(columns, warnings)
    }

    /// Source pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        self.pixels.contains(&(x, y))
    }
}

impl GlyphShape for SparsePixelGlyph {
    const MAX_WIDTH: u32 = 9;
    const MAX_HEIGHT: u32 = 8;

    fn height(&self) -> u32 {
        Self::MAX_HEIGHT
    }

    fn width(&self) -> u32 {
        self.advance
    }
}

impl fmt::Display for SparsePixelGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pixels: Vec<String> = self
            .pixels
            .iter()
            .map(|(x, y)| format!("({}, {})", x, y))
            .collect();
        write!(
            f,
            "SparsePixelGlyph({}, {}, {}, [{}])",
            self.advance,
            self.auto_update_advance,
            self.auto_advance_amount,
            pixels.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_column_scenario() {
        let g = SparsePixelGlyph::new(2, true, 0, vec![(1, 6), (0, 0)]).unwrap();
        let encoded = g.columns();
        assert!(encoded.is_clean());
        assert_eq!(encoded.value, vec![0x40, 0x01]);
    }

    #[test]
    fn test_advance_limit() {
        assert!(SparsePixelGlyph::new(MAX_ADVANCE, false, 0, Vec::new()).is_ok());
        assert_eq!(
            SparsePixelGlyph::new(MAX_ADVANCE + 1, false, 0, Vec::new()).unwrap_err(),
            GlyphError::AdvanceTooLarge {
                advance: MAX_ADVANCE + 1,
                max: MAX_ADVANCE
            }
        );
    }

    #[test]
    fn test_column_count_equals_advance() {
        let g = SparsePixelGlyph::new(5, false, 0, vec![(0, 3)]).unwrap();
        let columns = g.columns().value;
        assert_eq!(columns.len(), 5);
        assert_eq!(columns, vec![0x08, 0, 0, 0, 0]);
    }

    #[test]
    fn test_bit_seven_never_set() {
        let pixels: Vec<(u32, u32)> = (0..3).flat_map(|x| (0..=6).map(move |y| (x, y))).collect();
        let g = SparsePixelGlyph::new(3, true, 0, pixels).unwrap();
        assert_eq!(g.columns().value, vec![0x7F, 0x7F, 0x7F]);
    }

    #[test]
    fn test_pixel_outside_advance_warns_without_failing() {
        let g = SparsePixelGlyph::new(2, true, 0, vec![(0, 0), (2, 1)]).unwrap();
        let encoded = g.columns();
        assert_eq!(encoded.warnings.len(), 1);
        assert_eq!(encoded.warnings[0].code, WarningCode::PixelOutsideAdvance);
        assert!(encoded.warnings[0].message.contains("(2, 1)"));
        assert_eq!(encoded.value, vec![0x40, 0x00]);
    }

    #[test]
    fn test_empty_glyph() {
        let g = SparsePixelGlyph::new(3, true, 0, Vec::new()).unwrap();
        let encoded = g.columns();
        assert!(encoded.is_clean());
        assert_eq!(encoded.value, vec![0, 0, 0]);
    }

    #[test]
    fn test_row_seven_rejected() {
        let err = SparsePixelGlyph::new(3, true, 0, vec![(0, 7)]).unwrap_err();
        assert!(matches!(err, GlyphError::RowOutOfRange { x: 0, y: 7, .. }));
    }

    #[test]
    fn test_pixel_order_does_not_matter() {
        let a = SparsePixelGlyph::new(3, true, 0, vec![(2, 0), (0, 4), (1, 1)]).unwrap();
        let b = SparsePixelGlyph::new(3, true, 0, vec![(0, 4), (1, 1), (2, 0)]).unwrap();
        assert_eq!(a.columns(), b.columns());
    }

    #[test]
    fn test_metrics() {
        let g = SparsePixelGlyph::new(6, true, 1, Vec::new()).unwrap();
        assert_eq!(g.width(), 6);
        assert_eq!(g.height(), 8);
    }
}
