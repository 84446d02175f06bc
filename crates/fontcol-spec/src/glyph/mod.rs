//! Glyph model and column transforms.
//!
//! Every supported descriptor format has its own glyph record and its own
//! bit-transposition algorithm. [`Glyph`] closes over the three records so
//! the table builder can treat a font uniformly:
//!
//! - [`FixedNibbleGlyph`]: format A, 4 × 6 cell, one byte mask per column
//! - [`SparsePixelGlyph`]: format B, variable width, one byte mask per column
//! - [`RowMajorGlyph`]: format C, 8 × 16 cell, one byte pair per column

mod nibble;
mod row_major;
mod sparse;

pub use nibble::{BoundingBox, FixedNibbleGlyph};
pub use row_major::{combine, RowMajorGlyph, COLUMNS as ROW_MAJOR_COLUMNS, ROWS as ROW_MAJOR_ROWS};
pub use sparse::{SparsePixelGlyph, MAX_ADVANCE, MAX_PIXEL_ROW};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{BackendError, Encoded};

/// Pixel dimensions shared by every glyph record.
pub trait GlyphShape {
    /// Widest glyph the format's cell holds.
    const MAX_WIDTH: u32;
    /// Tallest glyph the format's cell holds.
    const MAX_HEIGHT: u32;

    /// Height of this glyph in pixels.
    fn height(&self) -> u32;

    /// Width of this glyph in pixels.
    fn width(&self) -> u32;
}

/// Errors raised when a glyph record cannot be represented by its format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    /// More source rows than the cell has.
    #[error("glyph has {rows} rows, format allows at most {max}")]
    TooManyRows { rows: usize, max: usize },

    /// A pixel row that the column bit mapping cannot address.
    #[error("pixel ({x}, {y}) is below the last addressable row {max}")]
    RowOutOfRange { x: u32, y: u32, max: u32 },

    /// An advance wider than any column index can describe.
    #[error("advance {advance} exceeds the maximum of {max}")]
    AdvanceTooLarge { advance: u32, max: u32 },
}

impl BackendError for GlyphError {
    fn code(&self) -> &'static str {
        match self {
            GlyphError::TooManyRows { .. } => "GLYPH_001",
            GlyphError::RowOutOfRange { .. } => "GLYPH_002",
            GlyphError::AdvanceTooLarge { .. } => "GLYPH_003",
        }
    }

    fn category(&self) -> &'static str {
        "glyph"
    }
}

/// Descriptor formats understood by fontcol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphFormat {
    /// BDF-style nibble-packed 4 × 6 glyphs.
    FixedNibble,
    /// PXF sparse pixel lists, variable width.
    SparsePixel,
    /// MEM row-major 8 × 16 bitmaps.
    RowMajor,
}

/// Table layout the serializer emits for a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// Concatenated byte columns plus an offset index.
    Variable,
    /// One fixed-size row of 16-bit columns per codepoint.
    Fixed,
}

impl GlyphFormat {
    /// Returns the format as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            GlyphFormat::FixedNibble => "fixed_nibble",
            GlyphFormat::SparsePixel => "sparse_pixel",
            GlyphFormat::RowMajor => "row_major",
        }
    }

    /// Cell width in pixels.
    pub fn max_width(&self) -> u32 {
        match self {
            GlyphFormat::FixedNibble => FixedNibbleGlyph::MAX_WIDTH,
            GlyphFormat::SparsePixel => SparsePixelGlyph::MAX_WIDTH,
            GlyphFormat::RowMajor => RowMajorGlyph::MAX_WIDTH,
        }
    }

    /// Cell height in pixels.
    pub fn max_height(&self) -> u32 {
        match self {
            GlyphFormat::FixedNibble => FixedNibbleGlyph::MAX_HEIGHT,
            GlyphFormat::SparsePixel => SparsePixelGlyph::MAX_HEIGHT,
            GlyphFormat::RowMajor => RowMajorGlyph::MAX_HEIGHT,
        }
    }

    /// Table layout this format is emitted as.
    pub fn table_shape(&self) -> TableShape {
        match self {
            GlyphFormat::FixedNibble | GlyphFormat::SparsePixel => TableShape::Variable,
            GlyphFormat::RowMajor => TableShape::Fixed,
        }
    }

    /// Conventional descriptor file extension.
    pub fn descriptor_extension(&self) -> &'static str {
        match self {
            GlyphFormat::FixedNibble => "bdf",
            GlyphFormat::SparsePixel => "pxf",
            GlyphFormat::RowMajor => "mem",
        }
    }

    /// Returns all formats.
    pub fn all() -> &'static [GlyphFormat] {
        &[
            GlyphFormat::FixedNibble,
            GlyphFormat::SparsePixel,
            GlyphFormat::RowMajor,
        ]
    }
}

impl std::fmt::Display for GlyphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GlyphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed_nibble" => Ok(GlyphFormat::FixedNibble),
            "sparse_pixel" => Ok(GlyphFormat::SparsePixel),
            "row_major" => Ok(GlyphFormat::RowMajor),
            _ => Err(format!("unknown glyph format: {}", s)),
        }
    }
}

/// Column-major representation of one glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// One mask byte per column (formats A and B).
    Bytes(Vec<u8>),
    /// One `[lower, upper]` pair per column (format C).
    Pairs(Vec<[u8; 2]>),
}

impl Columns {
    /// Number of columns.
    pub fn len(&self) -> usize {
        match self {
            Columns::Bytes(b) => b.len(),
            Columns::Pairs(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte columns, or `None` for 16-bit pair columns.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Columns::Bytes(b) => Some(b),
            Columns::Pairs(_) => None,
        }
    }

    /// Pair columns, or `None` for byte columns.
    pub fn as_pairs(&self) -> Option<&[[u8; 2]]> {
        match self {
            Columns::Bytes(_) => None,
            Columns::Pairs(p) => Some(p),
        }
    }
}

/// A glyph of any supported format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
    FixedNibble(FixedNibbleGlyph),
    SparsePixel(SparsePixelGlyph),
    RowMajor(RowMajorGlyph),
}

impl Glyph {
    /// Descriptor format this glyph came from.
    pub fn format(&self) -> GlyphFormat {
        match self {
            Glyph::FixedNibble(_) => GlyphFormat::FixedNibble,
            Glyph::SparsePixel(_) => GlyphFormat::SparsePixel,
            Glyph::RowMajor(_) => GlyphFormat::RowMajor,
        }
    }

    /// Height of the glyph in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Glyph::FixedNibble(g) => g.height(),
            Glyph::SparsePixel(g) => g.height(),
            Glyph::RowMajor(g) => g.height(),
        }
    }

    /// Width of the glyph in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Glyph::FixedNibble(g) => g.width(),
            Glyph::SparsePixel(g) => g.width(),
            Glyph::RowMajor(g) => g.width(),
        }
    }

    /// Cell height of the glyph's format.
    pub fn max_height(&self) -> u32 {
        self.format().max_height()
    }

    /// Cell width of the glyph's format.
    pub fn max_width(&self) -> u32 {
        self.format().max_width()
    }

    /// Column-major representation plus any warnings raised on the way.
    pub fn columns(&self) -> Encoded<Columns> {
        match self {
            Glyph::FixedNibble(g) => Encoded::clean(Columns::Bytes(g.columns())),
            Glyph::SparsePixel(g) => g.columns().map(Columns::Bytes),
            Glyph::RowMajor(g) => Encoded::clean(Columns::Pairs(g.columns().to_vec())),
        }
    }

    /// ASCII-art rendering of the source pixels, `#` for lit, `.` for blank.
    pub fn preview(&self) -> String {
        let (width, height) = match self {
            Glyph::FixedNibble(g) => (FixedNibbleGlyph::COLUMNS as u32, g.bitmap().len() as u32),
            Glyph::SparsePixel(g) => {
                let widest = g
                    .pixels()
                    .iter()
                    .map(|&(x, _)| x.saturating_add(1))
                    .max()
                    .unwrap_or(0);
                (g.advance().max(widest).min(MAX_ADVANCE + 1), MAX_PIXEL_ROW + 1)
            }
            Glyph::RowMajor(_) => (ROW_MAJOR_COLUMNS as u32, ROW_MAJOR_ROWS as u32),
        };

        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                let lit = match self {
                    Glyph::FixedNibble(g) => g.pixel(x, y),
                    Glyph::SparsePixel(g) => g.pixel(x, y),
                    Glyph::RowMajor(g) => g.pixel(x, y),
                };
                out.push(if lit { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Glyph::FixedNibble(g) => write!(f, "{}", g),
            Glyph::SparsePixel(g) => write!(f, "{}", g),
            Glyph::RowMajor(g) => write!(f, "{}", g),
        }
    }
}

impl From<FixedNibbleGlyph> for Glyph {
    fn from(g: FixedNibbleGlyph) -> Self {
        Glyph::FixedNibble(g)
    }
}

impl From<SparsePixelGlyph> for Glyph {
    fn from(g: SparsePixelGlyph) -> Self {
        Glyph::SparsePixel(g)
    }
}

impl From<RowMajorGlyph> for Glyph {
    fn from(g: RowMajorGlyph) -> Self {
        Glyph::RowMajor(g)
    }
}
