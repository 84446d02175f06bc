//! fontcol Descriptor Readers
//!
//! Readers for the three bitmap-font descriptor formats. Each reader turns
//! descriptor text into a [`GlyphCollection`] and returns the non-fatal
//! conditions it met (duplicate codepoints, skipped lines) alongside it.
//!
//! | Format | Reader | File |
//! |--------|--------|------|
//! | [`GlyphFormat::FixedNibble`] | [`bdf::parse_bdf`] | `.bdf` |
//! | [`GlyphFormat::SparsePixel`] | [`pxf::parse_pxf`] | `.pxf` |
//! | [`GlyphFormat::RowMajor`] | [`mem::parse_mem`] | `.mem` |
//!
//! # Example
//!
//! ```
//! use fontcol_descriptor::parse;
//! use fontcol_spec::GlyphFormat;
//!
//! let text = "num_glyphs 1\nglyphs\n\t33:\n\t\tadvance 2\n\t\tauto_update_advance true\n\t\tauto_advance_amount 0\n\t\t!: 0 0, 1 6\n";
//! let parsed = parse(GlyphFormat::SparsePixel, text).unwrap();
//! assert_eq!(parsed.value.len(), 1);
//! assert!(parsed.is_clean());
//! ```

pub mod bdf;
pub mod error;
mod lines;
pub mod mem;
pub mod pxf;

pub use error::DescriptorError;

use fontcol_spec::{Encoded, GlyphCollection, GlyphFormat};

/// Parses descriptor text with the reader for `format`.
pub fn parse(format: GlyphFormat, text: &str) -> Result<Encoded<GlyphCollection>, DescriptorError> {
    match format {
        GlyphFormat::FixedNibble => bdf::parse_bdf(text),
        GlyphFormat::SparsePixel => pxf::parse_pxf(text),
        GlyphFormat::RowMajor => mem::parse_mem(text),
    }
}
