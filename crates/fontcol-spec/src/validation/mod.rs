//! Manifest validation logic.

mod path_safety;

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::manifest::{FontManifest, MANIFEST_VERSION};

pub use path_safety::is_safe_output_path;

use path_safety::validate_output_path;

/// Regex pattern for a valid font_id. The id prefixes every emitted C
/// symbol, so it must be a lowercase C identifier.
const FONT_ID_PATTERN: &str = r"^[a-z_][a-z0-9_]{0,62}$";

static FONT_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn font_id_regex() -> &'static Regex {
    FONT_ID_REGEX.get_or_init(|| Regex::new(FONT_ID_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `id` is usable as a font id and symbol prefix.
pub fn is_valid_font_id(id: &str) -> bool {
    font_id_regex().is_match(id)
}

/// Validates a manifest.
///
/// # Example
/// ```
/// use fontcol_spec::{FontManifest, GlyphFormat};
/// use fontcol_spec::validation::validate_manifest;
///
/// let manifest = FontManifest::builder("font_16x8", GlyphFormat::RowMajor)
///     .source("font_bizcat8x16.mem")
///     .license("CC0-1.0")
///     .build();
///
/// assert!(validate_manifest(&manifest).is_ok());
/// ```
pub fn validate_manifest(manifest: &FontManifest) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_manifest_version(manifest, &mut result);
    validate_font_id(manifest, &mut result);
    validate_source(manifest, &mut result);
    validate_output_path(manifest, &mut result);

    if manifest.license.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingLicense,
            "manifest has no license; the generated header will omit it",
            "license",
        ));
    }

    result
}

fn validate_manifest_version(manifest: &FontManifest, result: &mut ValidationResult) {
    if manifest.manifest_version != MANIFEST_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedManifestVersion,
            format!(
                "manifest_version must be {}, got {}",
                MANIFEST_VERSION, manifest.manifest_version
            ),
            "manifest_version",
        ));
    }
}

fn validate_font_id(manifest: &FontManifest, result: &mut ValidationResult) {
    if !is_valid_font_id(&manifest.font_id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFontId,
            format!(
                "font_id must match pattern '{}', got '{}'",
                FONT_ID_PATTERN, manifest.font_id
            ),
            "font_id",
        ));
    }
}

fn validate_source(manifest: &FontManifest, result: &mut ValidationResult) {
    if manifest.source.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptySourcePath,
            "source must name a descriptor file",
            "source",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphFormat;

    fn manifest() -> FontManifest {
        FontManifest::builder("font_8x9", GlyphFormat::SparsePixel)
            .source("font.pxf")
            .license("CC0-1.0")
            .build()
    }

    #[test]
    fn test_valid_manifest() {
        let result = validate_manifest(&manifest());
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_font_id_pattern() {
        assert!(is_valid_font_id("font_8x9"));
        assert!(is_valid_font_id("_f"));
        assert!(!is_valid_font_id("8x9"));
        assert!(!is_valid_font_id("Font"));
        assert!(!is_valid_font_id("font-8x9"));
        assert!(!is_valid_font_id(""));
    }

    #[test]
    fn test_invalid_font_id_reported() {
        let mut m = manifest();
        m.font_id = "Bad-Id".to_string();
        let result = validate_manifest(&m);
        assert!(!result.is_ok());
        assert_eq!(result.errors[0].code, ErrorCode::InvalidFontId);
        assert_eq!(result.errors[0].path.as_deref(), Some("font_id"));
    }

    #[test]
    fn test_version_mismatch() {
        let mut m = manifest();
        m.manifest_version = 2;
        let result = validate_manifest(&m);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnsupportedManifestVersion));
    }

    #[test]
    fn test_output_checks() {
        let mut m = manifest();
        m.output = "../escape.c".to_string();
        let result = validate_manifest(&m);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnsafeOutputPath));

        m.output = "font.h".to_string();
        let result = validate_manifest(&m);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::OutputExtensionMismatch));
    }

    #[test]
    fn test_empty_source() {
        let mut m = manifest();
        m.source = "  ".to_string();
        let result = validate_manifest(&m);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EmptySourcePath));
    }

    #[test]
    fn test_missing_license_is_warning() {
        let mut m = manifest();
        m.license.clear();
        let result = validate_manifest(&m);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::MissingLicense);
    }
}
