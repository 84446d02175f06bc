//! Main entry point for C source generation.
//!
//! This module turns a manifest plus a parsed glyph collection into the
//! complete C source text. Nothing touches the filesystem until
//! [`save_source_result`] is called, so a fatal error leaves no file behind.

use std::path::Path;

use fontcol_spec::report::TableMetrics;
use fontcol_spec::{
    is_valid_font_id, BackendError, FontManifest, GlyphCollection, GlyphFormat, ValidationWarning,
};
use thiserror::Error;

use crate::emit::{render, SourceHeader};
use crate::table::{Table, TableError};

/// Errors from source generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("manifest declares {manifest} but the glyphs are {glyphs}")]
    FormatMismatch {
        manifest: GlyphFormat,
        glyphs: GlyphFormat,
    },

    #[error("'{0}' is not a valid C symbol prefix")]
    InvalidSymbolPrefix(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for GenerateError {
    fn code(&self) -> &'static str {
        match self {
            GenerateError::Table(e) => e.code(),
            GenerateError::FormatMismatch { .. } => "GEN_001",
            GenerateError::InvalidSymbolPrefix(_) => "GEN_002",
            GenerateError::Io(_) => "GEN_003",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            GenerateError::Table(e) => e.category(),
            _ => "generate",
        }
    }
}

/// Result of generating one C source file.
#[derive(Debug)]
pub struct SourceResult {
    /// Complete C source text.
    pub source: String,
    /// BLAKE3 hash of the source bytes.
    pub hash: String,
    /// The table the source was rendered from.
    pub table: Table,
    /// Warnings raised while building the table.
    pub warnings: Vec<ValidationWarning>,
}

impl SourceResult {
    /// Size of the source in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.source.len() as u64
    }

    /// Table statistics for reports.
    pub fn metrics(&self) -> TableMetrics {
        match &self.table {
            Table::Variable(t) => TableMetrics::Variable {
                glyph_count: t.index().len() - 1,
                blob_len: t.blob().len(),
                index_bits: t.index_type().bits(),
            },
            Table::Fixed(t) => TableMetrics::Fixed {
                glyph_count: t.rows().len(),
                columns_per_glyph: fontcol_spec::glyph::ROW_MAJOR_COLUMNS,
            },
        }
    }
}

/// Builds the table for `collection` and renders it with the manifest's
/// symbol prefix and provenance header.
pub fn generate_font_source(
    manifest: &FontManifest,
    collection: &GlyphCollection,
) -> Result<SourceResult, GenerateError> {
    if !is_valid_font_id(&manifest.font_id) {
        return Err(GenerateError::InvalidSymbolPrefix(manifest.font_id.clone()));
    }
    if manifest.format != collection.format() {
        return Err(GenerateError::FormatMismatch {
            manifest: manifest.format,
            glyphs: collection.format(),
        });
    }

    let built = Table::build(collection)?;
    let source = render(
        &manifest.font_id,
        &SourceHeader::from_manifest(manifest),
        &built.value,
    );
    let hash = blake3::hash(source.as_bytes()).to_hex().to_string();

    Ok(SourceResult {
        source,
        hash,
        table: built.value,
        warnings: built.warnings,
    })
}

/// Writes the source to `out_root/relative`, creating parent directories.
pub fn save_source_result(
    result: &SourceResult,
    out_root: &Path,
    relative: &str,
) -> Result<(), GenerateError> {
    let path = out_root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, result.source.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcol_spec::codepoint;
    use fontcol_spec::{RowMajorGlyph, SparsePixelGlyph};

    fn sparse_collection() -> GlyphCollection {
        let mut collection = GlyphCollection::new(GlyphFormat::SparsePixel);
        for cp in codepoint::window() {
            let glyph = SparsePixelGlyph::new(2, true, 0, vec![(0, 0), (1, 6)]).unwrap();
            collection.insert(cp, glyph.into());
        }
        collection
    }

    fn manifest(format: GlyphFormat) -> FontManifest {
        FontManifest::builder("font_8x9", format)
            .source("font.pxf")
            .title("Pixelated")
            .build()
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate_font_source(&manifest(GlyphFormat::SparsePixel), &sparse_collection()).unwrap();
        let b = generate_font_source(&manifest(GlyphFormat::SparsePixel), &sparse_collection()).unwrap();
        assert_eq!(a.source, b.source);
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash.len(), 64);
        assert!(a.warnings.is_empty());
        assert_eq!(
            a.metrics(),
            TableMetrics::Variable {
                glyph_count: 94,
                blob_len: 188,
                index_bits: 8
            }
        );
    }

    #[test]
    fn test_format_mismatch() {
        let err = generate_font_source(&manifest(GlyphFormat::RowMajor), &sparse_collection())
            .unwrap_err();
        assert!(matches!(err, GenerateError::FormatMismatch { .. }));
        assert_eq!(err.code(), "GEN_001");
    }

    #[test]
    fn test_invalid_prefix() {
        let mut m = manifest(GlyphFormat::SparsePixel);
        m.font_id = "8bit".to_string();
        let err = generate_font_source(&m, &sparse_collection()).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidSymbolPrefix(_)));
    }

    #[test]
    fn test_table_error_keeps_code() {
        let mut collection = GlyphCollection::new(GlyphFormat::RowMajor);
        collection.insert(0x21, RowMajorGlyph::new([0; 16]).into());
        let err = generate_font_source(&manifest(GlyphFormat::RowMajor), &collection).unwrap_err();
        assert_eq!(err.code(), "TABLE_001");
        assert_eq!(err.category(), "table");
    }

    #[test]
    fn test_save_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let result =
            generate_font_source(&manifest(GlyphFormat::SparsePixel), &sparse_collection()).unwrap();
        save_source_result(&result, tmp.path(), "fonts/generated/font_8x9.c").unwrap();

        let written = std::fs::read(tmp.path().join("fonts/generated/font_8x9.c")).unwrap();
        assert_eq!(written, result.source.as_bytes());
        assert_eq!(result.size_bytes(), written.len() as u64);
    }
}
