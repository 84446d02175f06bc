//! Generate command implementation
//!
//! Converts one font manifest's descriptor into a C source file and writes
//! `<font_id>.report.json` next to the manifest.

mod human;
mod json;

#[cfg(test)]
mod tests;

use anyhow::Result;
use fontcol_spec::{
    canonical_manifest_hash, validate_manifest, OutputResult, ReportBuilder, ReportError,
    ValidationWarning,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use crate::commands::json_output::{
    backend_error_to_json, descriptor_read_to_json, input_error_to_json,
    validation_error_to_json, JsonError,
};
use crate::commands::reporting;
use crate::dispatch::dispatch_generate;
use crate::input::{load_manifest, read_descriptor, LoadResult};

/// How a single generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    /// Output and report written.
    Success,
    /// The manifest could not be loaded or failed validation.
    ManifestError,
    /// The descriptor could not be read, parsed, or turned into a table.
    GenerationError,
}

impl GenerateStatus {
    /// Process exit code: 0 success, 1 manifest error, 2 generation error.
    pub fn exit_code(self) -> u8 {
        match self {
            GenerateStatus::Success => 0,
            GenerateStatus::ManifestError => 1,
            GenerateStatus::GenerationError => 2,
        }
    }
}

/// Everything one generation produced, for either output mode.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub status: GenerateStatus,
    pub font_id: Option<String>,
    pub manifest_hash: Option<String>,
    pub source_hash: Option<String>,
    /// The written source (on success).
    pub output: Option<OutputResult>,
    /// Glyphs the descriptor defined (once parsed).
    pub glyph_count: Option<usize>,
    /// Report file, once written.
    pub report_path: Option<PathBuf>,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<ValidationWarning>,
    pub duration_ms: u64,
}

impl GenerateOutcome {
    fn new() -> Self {
        Self {
            status: GenerateStatus::Success,
            font_id: None,
            manifest_hash: None,
            source_hash: None,
            output: None,
            glyph_count: None,
            report_path: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == GenerateStatus::Success
    }

    fn fail(mut self, status: GenerateStatus, error: JsonError) -> Self {
        self.status = status;
        self.errors.push(error);
        self
    }
}

/// Run the generate command
///
/// # Arguments
/// * `manifest_path` - Path to the `*.font.json` manifest
/// * `out_root` - Output root directory (default: current directory)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 manifest error, 2 generation error
pub fn run(manifest_path: &str, out_root: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let out_root = out_root.unwrap_or(".");
    if json_output {
        json::run_json(manifest_path, out_root)
    } else {
        human::run_human(manifest_path, out_root)
    }
}

/// Generates one font without printing anything.
///
/// Failures that belong to the font (bad manifest, bad descriptor, missing
/// glyphs) are recorded in the outcome; only a failure to write the report
/// itself is returned as an error.
pub fn execute(manifest_path: &Path, out_root: &Path) -> Result<GenerateOutcome> {
    let start = Instant::now();
    let mut outcome = GenerateOutcome::new();
    let file = manifest_path.display().to_string();

    let LoadResult {
        manifest,
        manifest_dir,
    } = match load_manifest(manifest_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = input_error_to_json(&e, Some(&file));
            return Ok(outcome.fail(GenerateStatus::ManifestError, error));
        }
    };

    let manifest_hash =
        canonical_manifest_hash(&manifest).unwrap_or_else(|_| "unknown".to_string());
    outcome.font_id = Some(manifest.font_id.clone());
    outcome.manifest_hash = Some(manifest_hash.clone());

    let generator_version = format!("fontcol-cli v{}", env!("CARGO_PKG_VERSION"));
    let mut builder = ReportBuilder::new(manifest_hash, generator_version).manifest_metadata(&manifest);

    let validation = validate_manifest(&manifest);
    outcome.warnings.extend(validation.warnings.iter().cloned());
    builder = builder.validation_warnings(&validation.warnings);

    if !validation.is_ok() {
        outcome.status = GenerateStatus::ManifestError;
        outcome
            .errors
            .extend(validation.errors.iter().map(validation_error_to_json));
        builder = builder.validation_errors(&validation.errors);
        return finish(outcome, builder, manifest_path, &manifest.font_id, start);
    }

    let descriptor = match read_descriptor(&manifest, &manifest_dir) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            let error = descriptor_read_to_json(&e, &manifest.source);
            builder = builder.error(ReportError::new(&error.code, &error.message));
            let outcome = outcome.fail(GenerateStatus::GenerationError, error);
            return finish(outcome, builder, manifest_path, &manifest.font_id, start);
        }
    };
    outcome.source_hash = Some(descriptor.hash.clone());
    builder = builder.source_hash(&descriptor.hash);

    match dispatch_generate(&manifest, &descriptor.text, out_root) {
        Ok((rendered, output)) => {
            outcome.glyph_count = Some(rendered.glyph_count);
            outcome.warnings.extend(rendered.warnings.iter().cloned());
            builder = builder
                .validation_warnings(&rendered.warnings)
                .output(output.clone());
            outcome.output = Some(output);
        }
        Err(e) => {
            let error = backend_error_to_json(&e, e.line()).with_file(&manifest.source);
            builder = builder.error(ReportError::new(&error.code, &error.message));
            outcome = outcome.fail(GenerateStatus::GenerationError, error);
        }
    }

    finish(outcome, builder, manifest_path, &manifest.font_id, start)
}

fn finish(
    mut outcome: GenerateOutcome,
    builder: ReportBuilder,
    manifest_path: &Path,
    font_id: &str,
    start: Instant,
) -> Result<GenerateOutcome> {
    outcome.duration_ms = start.elapsed().as_millis() as u64;
    let report = builder.duration_ms(outcome.duration_ms).build();
    let path = reporting::report_path(manifest_path, font_id);
    reporting::write_report(&report, &path)?;
    outcome.report_path = Some(path);
    Ok(outcome)
}
