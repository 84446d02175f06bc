//! Error and warning types shared by every fontcol crate.
//!
//! Fatal conditions are typed errors (each crate has its own `thiserror`
//! enum implementing [`BackendError`]). Non-fatal conditions are
//! [`ValidationWarning`] values that travel alongside a produced value in
//! [`Encoded`], so callers decide how to surface them.

use thiserror::Error;

/// Error codes for manifest validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Unsupported manifest_version
    UnsupportedManifestVersion,
    /// E002: Invalid font_id (also used as the C symbol prefix)
    InvalidFontId,
    /// E003: Unsafe output path (absolute, traversal, backslashes)
    UnsafeOutputPath,
    /// E004: Output path extension is not `.c`
    OutputExtensionMismatch,
    /// E005: Descriptor source path is empty
    EmptySourcePath,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedManifestVersion => "E001",
            ErrorCode::InvalidFontId => "E002",
            ErrorCode::UnsafeOutputPath => "E003",
            ErrorCode::OutputExtensionMismatch => "E004",
            ErrorCode::EmptySourcePath => "E005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for conditions that are reported but never block emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: A pixel's x coordinate is not strictly less than the glyph advance
    PixelOutsideAdvance,
    /// W002: A descriptor defines the same codepoint more than once
    DuplicateCodepoint,
    /// W003: A descriptor line was not recognized and was skipped
    UnexpectedLine,
    /// W004: Manifest has no license text
    MissingLicense,
    /// W005: Glyph is wider than its format's cell
    GlyphExceedsCell,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::PixelOutsideAdvance => "W001",
            WarningCode::DuplicateCodepoint => "W002",
            WarningCode::UnexpectedLine => "W003",
            WarningCode::MissingLicense => "W004",
            WarningCode::GlyphExceedsCell => "W005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "output").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A non-fatal diagnostic with code, message, and optional location.
///
/// For descriptor warnings the location is `line N`; for glyph warnings it
/// is the codepoint (`0x41`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Where the condition was found.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new warning with a location.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Returns the same warning with its location replaced.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// A produced value together with the non-fatal warnings raised while
/// producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<T> {
    /// The produced value.
    pub value: T,
    /// Diagnostics that did not stop production.
    pub warnings: Vec<ValidationWarning>,
}

impl<T> Encoded<T> {
    /// Wraps a value that produced no warnings.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Wraps a value with its warnings.
    pub fn with_warnings(value: T, warnings: Vec<ValidationWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if no warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transforms the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Encoded<U> {
        Encoded {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Moves the warnings into `sink` and returns the bare value.
    pub fn drain_into(self, sink: &mut Vec<ValidationWarning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

/// Top-level error type for manifest operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result of manifest validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for fatal errors raised by the pipeline stages.
///
/// Gives every stage a stable code (`DESC_002`, `TABLE_001`, ...) and a
/// category so the CLI can report failures uniformly.
pub trait BackendError: std::error::Error {
    /// Stable error code for reporting.
    fn code(&self) -> &'static str;

    /// Human-readable message. Defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category ("glyph", "descriptor", "table", ...).
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::UnsupportedManifestVersion.code(), "E001");
        assert_eq!(ErrorCode::InvalidFontId.code(), "E002");
        assert_eq!(ErrorCode::EmptySourcePath.code(), "E005");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::PixelOutsideAdvance.code(), "W001");
        assert_eq!(WarningCode::GlyphExceedsCell.code(), "W005");
    }

    #[test]
    fn test_warning_display() {
        let warning = ValidationWarning::new(WarningCode::UnexpectedLine, "skipped 'foo'");
        assert_eq!(warning.to_string(), "W003: skipped 'foo'");
        assert_eq!(
            warning.at("line 7").to_string(),
            "W003: skipped 'foo' (at line 7)"
        );
    }

    #[test]
    fn test_encoded_drain() {
        let encoded = Encoded::with_warnings(
            3u8,
            vec![ValidationWarning::new(WarningCode::DuplicateCodepoint, "dup")],
        );
        assert!(!encoded.is_clean());

        let mut sink = Vec::new();
        let value = encoded.map(|v| v * 2).drain_into(&mut sink);
        assert_eq!(value, 6);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::InvalidFontId, "bad id"));
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
    }
}
