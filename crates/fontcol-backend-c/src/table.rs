//! Column tables built from a glyph collection.
//!
//! Two shapes cover the three formats:
//!
//! - [`VariableTable`]: every glyph's byte columns concatenated into one
//!   blob, with an offset index of `WINDOW_LEN + 1` entries
//! - [`FixedTable`]: one row of eight 16-bit columns per codepoint
//!
//! Both expose a lookup that behaves exactly like the emitted C routine, so
//! the tables can be checked without a C compiler.

use fontcol_spec::codepoint::{self, char_literal, WINDOW_LEN};
use fontcol_spec::glyph::{combine, ROW_MAJOR_COLUMNS};
use fontcol_spec::{
    BackendError, Columns, Encoded, Glyph, GlyphCollection, GlyphFormat, TableShape,
    ValidationWarning, WarningCode,
};
use thiserror::Error;

/// Widest glyph the `int8_t` length of the C lookup can report.
pub const MAX_GLYPH_COLUMNS: usize = i8::MAX as usize;

/// Fatal errors raised while building a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A codepoint of the window has no glyph.
    #[error("no glyph for codepoint 0x{codepoint:02x} {label}; every codepoint in 0x21..=0x7E is required")]
    MissingCodepoint { codepoint: u32, label: String },

    /// A glyph has more columns than the lookup length can express.
    #[error("glyph 0x{codepoint:02x} has {columns} columns, at most {max} are addressable")]
    GlyphTooWide {
        codepoint: u32,
        columns: usize,
        max: usize,
    },

    /// The collection's format does not produce this table shape.
    #[error("{format} glyphs do not produce a {expected:?} table")]
    FormatMismatch {
        format: GlyphFormat,
        expected: TableShape,
    },

    /// A glyph's format differs from the format of its collection.
    #[error("glyph 0x{codepoint:02x} is {found}, the font is {expected}")]
    GlyphFormatMismatch {
        codepoint: u32,
        found: GlyphFormat,
        expected: GlyphFormat,
    },

    /// Every glyph in the window has zero columns.
    #[error("column blob is empty; C does not allow an empty array")]
    EmptyBlob,

    /// The blob is too long for a 16-bit offset index.
    #[error("column blob is {len} bytes, the offset index addresses at most {max}")]
    BlobTooLarge { len: usize, max: usize },
}

impl BackendError for TableError {
    fn code(&self) -> &'static str {
        match self {
            TableError::MissingCodepoint { .. } => "TABLE_001",
            TableError::GlyphTooWide { .. } => "TABLE_002",
            TableError::FormatMismatch { .. } => "TABLE_003",
            TableError::EmptyBlob => "TABLE_004",
            TableError::BlobTooLarge { .. } => "TABLE_005",
            TableError::GlyphFormatMismatch { .. } => "TABLE_006",
        }
    }

    fn category(&self) -> &'static str {
        "table"
    }
}

/// C element type of the offset index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U8,
    U16,
}

impl IndexType {
    /// C type name.
    pub fn c_type(&self) -> &'static str {
        match self {
            IndexType::U8 => "uint8_t",
            IndexType::U16 => "uint16_t",
        }
    }

    /// Element width in bits.
    pub fn bits(&self) -> u8 {
        match self {
            IndexType::U8 => 8,
            IndexType::U16 => 16,
        }
    }

    fn for_len(len: usize) -> Result<Self, TableError> {
        if len <= u8::MAX as usize {
            Ok(IndexType::U8)
        } else if len <= u16::MAX as usize {
            Ok(IndexType::U16)
        } else {
            Err(TableError::BlobTooLarge {
                len,
                max: u16::MAX as usize,
            })
        }
    }
}

/// Error for a glyph whose columns do not fit the collection's table shape.
fn shape_mismatch(codepoint: u32, collection: &GlyphCollection) -> TableError {
    TableError::GlyphFormatMismatch {
        codepoint,
        found: collection
            .get(codepoint)
            .map(|g| g.format())
            .unwrap_or(collection.format()),
        expected: collection.format(),
    }
}

/// Columns of every window glyph, in codepoint order, with warnings tagged.
fn window_columns(collection: &GlyphCollection) -> Result<Encoded<Vec<(u32, Columns)>>, TableError> {
    let mut warnings = Vec::new();
    let mut out = Vec::with_capacity(WINDOW_LEN);

    for cp in codepoint::window() {
        let glyph = collection
            .get(cp)
            .ok_or_else(|| TableError::MissingCodepoint {
                codepoint: cp,
                label: char_literal(cp),
            })?;
        if glyph.format() != collection.format() {
            return Err(TableError::GlyphFormatMismatch {
                codepoint: cp,
                found: glyph.format(),
                expected: collection.format(),
            });
        }
        let location = format!("0x{:02x}", cp);

        if glyph.width() > glyph.max_width() {
            warnings.push(ValidationWarning::with_path(
                WarningCode::GlyphExceedsCell,
                format!(
                    "glyph {} is {} pixels wide, the {} cell is {}",
                    char_literal(cp),
                    glyph.width(),
                    glyph.format(),
                    glyph.max_width()
                ),
                location.clone(),
            ));
        }

        let columns = glyph.columns();
        warnings.extend(columns.warnings.into_iter().map(|w| w.at(location.clone())));
        if columns.value.len() > MAX_GLYPH_COLUMNS {
            return Err(TableError::GlyphTooWide {
                codepoint: cp,
                columns: columns.value.len(),
                max: MAX_GLYPH_COLUMNS,
            });
        }
        out.push((cp, columns.value));
    }

    Ok(Encoded::with_warnings(out, warnings))
}

/// Variable-length byte columns plus offset index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableTable {
    blob: Vec<u8>,
    index: Vec<usize>,
    index_type: IndexType,
}

impl VariableTable {
    /// Builds the table from a fixed-nibble or sparse-pixel collection.
    pub fn build(collection: &GlyphCollection) -> Result<Encoded<Self>, TableError> {
        let format = collection.format();
        if format.table_shape() != TableShape::Variable {
            return Err(TableError::FormatMismatch {
                format,
                expected: TableShape::Variable,
            });
        }

        let Encoded { value, warnings } = window_columns(collection)?;
        let mut blob = Vec::new();
        let mut index = Vec::with_capacity(WINDOW_LEN + 1);
        let mut offset = 0usize;
        index.push(offset);

        for (cp, columns) in &value {
            let bytes = columns
                .as_bytes()
                .ok_or_else(|| shape_mismatch(*cp, collection))?;
            blob.extend_from_slice(bytes);
            offset += bytes.len();
            index.push(offset);
        }

        if blob.is_empty() {
            return Err(TableError::EmptyBlob);
        }
        let index_type = IndexType::for_len(blob.len())?;

        Ok(Encoded::with_warnings(
            Self {
                blob,
                index,
                index_type,
            },
            warnings,
        ))
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Offsets into the blob; entry `k` starts the glyph in slot `k`, and
    /// the last entry equals the blob length.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    /// Columns of `codepoint`, or `None` outside the window.
    pub fn columns(&self, codepoint: u32) -> Option<&[u8]> {
        let slot = codepoint::slot(codepoint)?;
        Some(&self.blob[self.index[slot]..self.index[slot + 1]])
    }

    /// Mirrors `<id>_get_columns`: copies the columns of `c` into `buf`
    /// and returns their count, or returns -1 when `c` is outside the
    /// window, the glyph has no columns, or `buf` is too short.
    pub fn copy_columns(&self, c: u8, buf: &mut [u8]) -> i8 {
        let Some(columns) = self.columns(c as u32) else {
            return -1;
        };
        let len = columns.len();
        if len == 0 {
            return -1;
        }
        match buf.get_mut(..len) {
            Some(dst) => {
                dst.copy_from_slice(columns);
                len as i8
            }
            None => -1,
        }
    }
}

/// Fixed `[WINDOW_LEN][8]` table of 16-bit columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTable {
    rows: Vec<[u16; ROW_MAJOR_COLUMNS]>,
}

impl FixedTable {
    /// Builds the table from a row-major collection.
    pub fn build(collection: &GlyphCollection) -> Result<Encoded<Self>, TableError> {
        let format = collection.format();
        if format.table_shape() != TableShape::Fixed {
            return Err(TableError::FormatMismatch {
                format,
                expected: TableShape::Fixed,
            });
        }

        let Encoded { value, warnings } = window_columns(collection)?;
        let rows = value
            .iter()
            .map(|(cp, columns)| {
                let src = columns
                    .as_pairs()
                    .ok_or_else(|| shape_mismatch(*cp, collection))?;
                let mut pairs = [[0u8; 2]; ROW_MAJOR_COLUMNS];
                for (dst, src) in pairs.iter_mut().zip(src) {
                    *dst = *src;
                }
                Ok(combine(&pairs))
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Ok(Encoded::with_warnings(Self { rows }, warnings))
    }

    /// One row per window codepoint, in codepoint order.
    pub fn rows(&self) -> &[[u16; ROW_MAJOR_COLUMNS]] {
        &self.rows
    }

    /// Combined columns of `codepoint`, or `None` outside the window.
    pub fn row(&self, codepoint: u32) -> Option<&[u16; ROW_MAJOR_COLUMNS]> {
        codepoint::slot(codepoint).map(|slot| &self.rows[slot])
    }

    /// Mirrors `<id>_get_columns`: copies the eight columns of `c` into
    /// `buf` and returns 8, or -1 when `c` is outside the window.
    pub fn copy_columns(&self, c: u8, buf: &mut [u16; ROW_MAJOR_COLUMNS]) -> i8 {
        match self.row(c as u32) {
            Some(row) => {
                *buf = *row;
                ROW_MAJOR_COLUMNS as i8
            }
            None => -1,
        }
    }
}

/// A built table of either shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Table {
    Variable(VariableTable),
    Fixed(FixedTable),
}

impl Table {
    /// Builds the table shape the collection's format calls for.
    pub fn build(collection: &GlyphCollection) -> Result<Encoded<Self>, TableError> {
        match collection.format().table_shape() {
            TableShape::Variable => Ok(VariableTable::build(collection)?.map(Table::Variable)),
            TableShape::Fixed => Ok(FixedTable::build(collection)?.map(Table::Fixed)),
        }
    }

    pub fn shape(&self) -> TableShape {
        match self {
            Table::Variable(_) => TableShape::Variable,
            Table::Fixed(_) => TableShape::Fixed,
        }
    }
}

/// Glyph representation line as listed by `inspect --dump`.
pub fn describe(codepoint: u32, glyph: &Glyph) -> String {
    format!("{}: {}", char_literal(codepoint), glyph)
}
