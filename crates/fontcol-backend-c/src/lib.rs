//! fontcol C Table Backend
//!
//! This crate packs a glyph collection into column tables and renders them
//! as a self-contained C source file.
//!
//! # Table shapes
//!
//! - **Variable** (fixed nibble, sparse pixel): a `uint8_t` column blob, an
//!   offset index with one entry per window codepoint plus a terminator,
//!   and a lookup that copies a glyph's columns and returns their count
//! - **Fixed** (row major): a `uint16_t [94][8]` table and a lookup that
//!   always copies eight columns
//!
//! # Determinism
//!
//! The same manifest and glyphs always render to byte-identical source:
//!
//! - Codepoints are emitted in increasing order
//! - No timestamps or host paths appear in the output
//! - The BLAKE3 hash of the source is returned with it
//!
//! # Example
//!
//! ```
//! use fontcol_backend_c::generate_font_source;
//! use fontcol_spec::codepoint::window;
//! use fontcol_spec::{FontManifest, GlyphCollection, GlyphFormat, RowMajorGlyph};
//!
//! let manifest = FontManifest::builder("font_16x8", GlyphFormat::RowMajor)
//!     .source("font.mem")
//!     .build();
//! let mut glyphs = GlyphCollection::new(GlyphFormat::RowMajor);
//! for cp in window() {
//!     glyphs.insert(cp, RowMajorGlyph::new([0; 16]).into());
//! }
//!
//! let result = generate_font_source(&manifest, &glyphs).unwrap();
//! assert!(result.source.contains("const uint16_t font_16x8_columns[0x7E - 0x20][8]"));
//! ```

pub mod emit;
pub mod generate;
pub mod table;

pub use emit::{render, SourceHeader};
pub use generate::{generate_font_source, save_source_result, GenerateError, SourceResult};
pub use table::{
    describe, FixedTable, IndexType, Table, TableError, VariableTable, MAX_GLYPH_COLUMNS,
};
