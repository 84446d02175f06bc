//! Builder pattern for creating reports.

use super::{OutputResult, Report, ReportError, ReportWarning, REPORT_VERSION};
use crate::error::{ValidationError, ValidationWarning};
use crate::glyph::GlyphFormat;
use crate::manifest::FontManifest;

/// Builder for creating reports ergonomically.
pub struct ReportBuilder {
    manifest_hash: String,
    font_id: Option<String>,
    format: Option<GlyphFormat>,
    source_hash: Option<String>,
    ok: bool,
    errors: Vec<ReportError>,
    warnings: Vec<ReportWarning>,
    outputs: Vec<OutputResult>,
    duration_ms: u64,
    generator_version: String,
}

impl ReportBuilder {
    /// Creates a new report builder.
    ///
    /// # Example
    ///
    /// ```
    /// use fontcol_spec::report::ReportBuilder;
    ///
    /// let report = ReportBuilder::new(
    ///     "a1b2c3d4...".to_string(),
    ///     "fontcol-cli v0.1.0".to_string()
    /// )
    /// .ok(true)
    /// .duration_ms(12)
    /// .build();
    /// assert!(report.ok);
    /// ```
    pub fn new(manifest_hash: String, generator_version: String) -> Self {
        Self {
            manifest_hash,
            font_id: None,
            format: None,
            source_hash: None,
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            outputs: Vec::new(),
            duration_ms: 0,
            generator_version,
        }
    }

    /// Sets the ok status.
    pub fn ok(mut self, ok: bool) -> Self {
        self.ok = ok;
        self
    }

    /// Adds provenance metadata from a manifest.
    pub fn manifest_metadata(mut self, manifest: &FontManifest) -> Self {
        self.font_id = Some(manifest.font_id.clone());
        self.format = Some(manifest.format);
        self
    }

    /// Sets the BLAKE3 hash of the descriptor file.
    pub fn source_hash(mut self, hash: impl Into<String>) -> Self {
        self.source_hash = Some(hash.into());
        self
    }

    /// Adds an error to the report.
    pub fn error(mut self, error: ReportError) -> Self {
        self.errors.push(error);
        self.ok = false;
        self
    }

    /// Adds errors from ValidationErrors.
    pub fn validation_errors(mut self, errors: &[ValidationError]) -> Self {
        if !errors.is_empty() {
            self.ok = false;
            self.errors
                .extend(errors.iter().map(ReportError::from_validation_error));
        }
        self
    }

    /// Adds warnings from ValidationWarnings.
    pub fn validation_warnings(mut self, warnings: &[ValidationWarning]) -> Self {
        self.warnings
            .extend(warnings.iter().map(ReportWarning::from_validation_warning));
        self
    }

    /// Adds an output to the report.
    pub fn output(mut self, output: OutputResult) -> Self {
        self.outputs.push(output);
        self
    }

    /// Sets the execution duration in milliseconds.
    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Builds the final report.
    pub fn build(self) -> Report {
        Report {
            report_version: REPORT_VERSION,
            manifest_hash: self.manifest_hash,
            font_id: self.font_id,
            format: self.format,
            source_hash: self.source_hash,
            ok: self.ok,
            errors: self.errors,
            warnings: self.warnings,
            outputs: self.outputs,
            duration_ms: self.duration_ms,
            generator_version: self.generator_version,
        }
    }
}
