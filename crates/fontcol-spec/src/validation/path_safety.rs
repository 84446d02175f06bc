//! Output path safety validation.

use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::manifest::FontManifest;

/// Checks if an output path is safe.
pub fn is_safe_output_path(path: &str) -> bool {
    output_path_safety_errors(path).is_empty()
}

/// Validates the manifest's output path for safety and extension.
pub(super) fn validate_output_path(manifest: &FontManifest, result: &mut ValidationResult) {
    let path = &manifest.output;

    for message in output_path_safety_errors(path) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsafeOutputPath,
            message,
            "output",
        ));
    }

    if !path.is_empty() && !path.ends_with(".c") {
        result.add_error(ValidationError::with_path(
            ErrorCode::OutputExtensionMismatch,
            format!("output path must end in '.c': '{}'", path),
            "output",
        ));
    }
}

pub(super) fn output_path_safety_errors(path: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if path.is_empty() {
        errors.push("output path cannot be empty".to_string());
        return errors;
    }

    if path.starts_with('/') || path.starts_with('\\') {
        errors.push(format!(
            "output path must be relative, not absolute: '{}'",
            path
        ));
    }

    if path.len() >= 2 && path.chars().nth(1) == Some(':') {
        errors.push(format!(
            "output path must not contain drive letter: '{}'",
            path
        ));
    }

    if path.contains('\\') {
        errors.push(format!(
            "output path must use forward slashes only: '{}'",
            path
        ));
    }

    if path.split('/').any(|segment| segment == "..") {
        errors.push(format!("output path must not contain '..': '{}'", path));
    }

    errors
}
