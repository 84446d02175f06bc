//! Report types for generation and validation results.
//!
//! A report records what a `fontcol generate` run consumed (manifest and
//! descriptor hashes), what it produced, and every error or warning raised
//! along the way. Reports are written as `<font_id>.report.json`.

mod builder;
mod error;
mod output;

pub use builder::ReportBuilder;
pub use error::{ReportError, ReportWarning};
pub use output::{OutputResult, TableMetrics};

use crate::glyph::GlyphFormat;
use serde::{Deserialize, Serialize};

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// A complete report for a generation or validation operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (always 1).
    pub report_version: u32,
    /// Hex BLAKE3 hash of the canonicalized manifest.
    pub manifest_hash: String,
    /// Font id from the manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_id: Option<String>,
    /// Descriptor format from the manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<GlyphFormat>,
    /// Hex BLAKE3 hash of the descriptor file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    /// Whether the operation succeeded without errors.
    pub ok: bool,
    /// Errors that occurred.
    pub errors: Vec<ReportError>,
    /// Warnings that were raised.
    pub warnings: Vec<ReportWarning>,
    /// Files produced.
    pub outputs: Vec<OutputResult>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
    /// Generator identifier and version.
    pub generator_version: String,
}

impl Report {
    /// Creates a new report builder.
    pub fn builder(manifest_hash: String, generator_version: String) -> ReportBuilder {
        ReportBuilder::new(manifest_hash, generator_version)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ValidationError, ValidationWarning, WarningCode};
    use crate::manifest::FontManifest;

    #[test]
    fn test_builder_collects_messages() {
        let manifest = FontManifest::builder("font_8x9", GlyphFormat::SparsePixel)
            .source("f.pxf")
            .build();
        let report = Report::builder("hash".to_string(), "fontcol-cli v0.1.0".to_string())
            .manifest_metadata(&manifest)
            .validation_warnings(&[ValidationWarning::new(
                WarningCode::PixelOutsideAdvance,
                "pixel outside",
            )])
            .build();
        assert!(report.ok);
        assert_eq!(report.font_id.as_deref(), Some("font_8x9"));
        assert_eq!(report.warnings[0].code, "W001");

        let failed = Report::builder("hash".to_string(), "v".to_string())
            .validation_errors(&[ValidationError::new(ErrorCode::InvalidFontId, "bad")])
            .build();
        assert!(!failed.ok);
        assert_eq!(failed.errors[0].code, "E002");
    }

    #[test]
    fn test_json_round_trip() {
        let report = Report::builder("h".to_string(), "v".to_string())
            .output(OutputResult::new(
                "font.c",
                "abc",
                120,
                TableMetrics::Variable {
                    glyph_count: 94,
                    blob_len: 400,
                    index_bits: 16,
                },
            ))
            .error(ReportError::new("TABLE_001", "missing codepoint"))
            .build();

        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"shape\": \"variable\""));
        let parsed = Report::from_json(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(!parsed.ok);
    }
}
