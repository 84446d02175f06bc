//! JSON output types for machine-readable CLI output.
//!
//! Every command that accepts `--json` prints exactly one of the output
//! records below, pretty-printed, on stdout.

use serde::{Deserialize, Serialize};

use fontcol_spec::{BackendError, OutputResult, ValidationError, ValidationWarning};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// These codes are stable. Backend failures pass their own codes through
/// (`DESC_00x`, `TABLE_00x`, `GEN_00x`), as do manifest validation errors
/// (`E00x`).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown manifest extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Descriptor named by the manifest could not be read
    pub const DESCRIPTOR_READ: &str = "CLI_004";
    /// Output on disk differs from a fresh render
    pub const OUTPUT_MISMATCH: &str = "CLI_005";
    /// Output file does not exist
    pub const OUTPUT_MISSING: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E002", "TABLE_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Manifest field the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 1-based descriptor line (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
            line: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Where the warning applies: a manifest field, `line N`, or a codepoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Converts an InputError to a JsonError.
pub fn input_error_to_json(err: &InputError, file: Option<&str>) -> JsonError {
    let code = match err {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
    };

    let mut error = JsonError::new(code, err.to_string());
    if let Some(f) = file {
        error = error.with_file(f);
    }
    error
}

/// Converts a failed descriptor read to a JsonError.
pub fn descriptor_read_to_json(err: &InputError, file: &str) -> JsonError {
    JsonError::new(error_codes::DESCRIPTOR_READ, err.to_string()).with_file(file)
}

/// Converts any backend error to a JsonError, keeping its stable code.
pub fn backend_error_to_json<E: BackendError>(err: &E, line: Option<usize>) -> JsonError {
    let error = JsonError::new(err.code(), err.message());
    match line {
        Some(line) => error.with_line(line),
        None => error,
    }
}

/// Converts a ValidationError to a JsonError.
pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    let mut error = JsonError::new(err.code.to_string(), &err.message);
    if let Some(ref path) = err.path {
        error = error.with_path(path);
    }
    error
}

/// Converts a ValidationWarning to a JsonWarning.
pub fn validation_warning_to_json(warn: &ValidationWarning) -> JsonWarning {
    let mut warning = JsonWarning::new(warn.code.to_string(), &warn.message);
    if let Some(ref path) = warn.path {
        warning = warning.with_path(path);
    }
    warning
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Process exit code the command returned
    pub exit_code: u8,
    /// Errors encountered during generation
    pub errors: Vec<JsonError>,
    /// Warnings from validation, parsing and table building
    pub warnings: Vec<JsonWarning>,
    /// Font id from the manifest (once loaded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_id: Option<String>,
    /// Canonical manifest hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_hash: Option<String>,
    /// BLAKE3 hash of the descriptor file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    /// The written C source (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputResult>,
    /// Path to the report file (once written)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the manifest and descriptor are usable
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    /// Glyphs the descriptor defines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph_count: Option<usize>,
}

/// JSON output for the `verify` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutput {
    /// Whether the file on disk matches a fresh render
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_id: Option<String>,
    /// Output path relative to the output root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// Hash of a fresh in-memory render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_hash: Option<String>,
    /// Hash of the file on disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hash: Option<String>,
}

/// One manifest's result inside `generate-all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestResult {
    /// Path to the manifest file
    pub manifest_path: String,
    /// Font id (if the manifest loaded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_id: Option<String>,
    pub success: bool,
    /// Errors for this manifest
    pub errors: Vec<JsonError>,
    /// Number of warnings raised
    pub warning_count: usize,
    /// Output hash (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_hash: Option<String>,
    pub duration_ms: u64,
}

/// JSON output for the `generate-all` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAllOutput {
    /// Whether every manifest succeeded
    pub success: bool,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Per-manifest results, in processing order
    pub results: Vec<ManifestResult>,
    pub duration_ms: u64,
}
