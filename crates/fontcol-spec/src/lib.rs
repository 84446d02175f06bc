//! fontcol Glyph Model Library
//!
//! This crate provides the glyph types, column transforms, manifest
//! validation, and hashing shared by every fontcol crate.
//!
//! # Overview
//!
//! A bitmap font arrives as one of three descriptor formats. Each format has
//! its own glyph record and its own transposition from source pixels to
//! column-major bit masks:
//!
//! - **Fixed nibble** (`.bdf`): 4 × 6 cell, one nibble per row
//! - **Sparse pixel** (`.pxf`): variable width, list of lit coordinates
//! - **Row major** (`.mem`): 8 × 16 cell, one byte per row
//!
//! The [`Glyph`] sum type hides the difference so a table builder can walk
//! the printable window `0x21..=0x7E` uniformly.
//!
//! # Example
//!
//! ```
//! use fontcol_spec::{FontManifest, GlyphFormat, Glyph, SparsePixelGlyph};
//! use fontcol_spec::validation::validate_manifest;
//! use fontcol_spec::hash::canonical_manifest_hash;
//!
//! let manifest = FontManifest::builder("font_8x9", GlyphFormat::SparsePixel)
//!     .source("pixelated.pxf")
//!     .title("Pixelated Elegance")
//!     .license("CC0-1.0")
//!     .build();
//! assert!(validate_manifest(&manifest).is_ok());
//!
//! let glyph: Glyph = SparsePixelGlyph::new(2, true, 0, vec![(0, 0), (1, 6)])
//!     .unwrap()
//!     .into();
//! let columns = glyph.columns();
//! assert!(columns.is_clean());
//! assert_eq!(columns.value.as_bytes(), Some(&[0x40, 0x01][..]));
//!
//! let hash = canonical_manifest_hash(&manifest).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`codepoint`]: The printable window and character labels
//! - [`collection`]: Codepoint-keyed glyph collections
//! - [`error`]: Error, warning, and diagnostic carrier types
//! - [`glyph`]: Glyph records and column transforms
//! - [`hash`]: Canonical hashing
//! - [`manifest`]: Font manifest and builder
//! - [`report`]: Report types and builder for generation results
//! - [`validation`]: Manifest validation functions

pub mod codepoint;
pub mod collection;
pub mod error;
pub mod glyph;
pub mod hash;
pub mod manifest;
pub mod report;
pub mod validation;

// Re-export commonly used types at the crate root
pub use collection::GlyphCollection;
pub use error::{
    BackendError, Encoded, ErrorCode, SpecError, ValidationError, ValidationResult,
    ValidationWarning, WarningCode,
};
pub use glyph::{
    BoundingBox, Columns, FixedNibbleGlyph, Glyph, GlyphError, GlyphFormat, GlyphShape,
    RowMajorGlyph, SparsePixelGlyph, TableShape,
};
pub use hash::{canonical_manifest_hash, content_hash};
pub use manifest::{FontManifest, FontManifestBuilder, MANIFEST_SUFFIX, MANIFEST_VERSION};
pub use report::{
    OutputResult, Report, ReportBuilder, ReportError, ReportWarning, TableMetrics, REPORT_VERSION,
};
pub use validation::{is_safe_output_path, is_valid_font_id, validate_manifest};
