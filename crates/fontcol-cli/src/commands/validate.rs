//! Validate command implementation
//!
//! Checks a manifest and parses its descriptor, building the table in
//! memory. Nothing is written.

use anyhow::{Context, Result};
use colored::Colorize;
use fontcol_spec::{canonical_manifest_hash, validate_manifest, ValidationWarning};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    backend_error_to_json, descriptor_read_to_json, input_error_to_json,
    validation_error_to_json, validation_warning_to_json, ValidateOutput,
};
use super::reporting;
use crate::dispatch::render_font;
use crate::input::{load_manifest, read_descriptor};

/// Run the validate command
///
/// # Arguments
/// * `manifest_path` - Path to the `*.font.json` manifest
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 valid, 1 invalid
pub fn run(manifest_path: &str, json_output: bool) -> Result<ExitCode> {
    let (output, warnings) = check(Path::new(manifest_path));

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        print_human(manifest_path, &output, &warnings);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn check(manifest_path: &Path) -> (ValidateOutput, Vec<ValidationWarning>) {
    let mut output = ValidateOutput {
        success: false,
        errors: Vec::new(),
        warnings: Vec::new(),
        font_id: None,
        manifest_hash: None,
        source_hash: None,
        glyph_count: None,
    };
    let mut warnings = Vec::new();
    let file = manifest_path.display().to_string();

    let loaded = match load_manifest(manifest_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            output.errors.push(input_error_to_json(&e, Some(&file)));
            return (output, warnings);
        }
    };
    let manifest = loaded.manifest;
    output.font_id = Some(manifest.font_id.clone());
    output.manifest_hash = canonical_manifest_hash(&manifest).ok();

    let validation = validate_manifest(&manifest);
    warnings.extend(validation.warnings.iter().cloned());
    if !validation.is_ok() {
        output
            .errors
            .extend(validation.errors.iter().map(validation_error_to_json));
        return finish(output, warnings);
    }

    let descriptor = match read_descriptor(&manifest, &loaded.manifest_dir) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            output
                .errors
                .push(descriptor_read_to_json(&e, &manifest.source));
            return finish(output, warnings);
        }
    };
    output.source_hash = Some(descriptor.hash.clone());

    match render_font(&manifest, &descriptor.text) {
        Ok(rendered) => {
            output.glyph_count = Some(rendered.glyph_count);
            warnings.extend(rendered.warnings);
        }
        Err(e) => output
            .errors
            .push(backend_error_to_json(&e, e.line()).with_file(&manifest.source)),
    }

    finish(output, warnings)
}

fn finish(
    mut output: ValidateOutput,
    warnings: Vec<ValidationWarning>,
) -> (ValidateOutput, Vec<ValidationWarning>) {
    output.success = output.errors.is_empty();
    output.warnings = warnings.iter().map(validation_warning_to_json).collect();
    (output, warnings)
}

fn print_human(manifest_path: &str, output: &ValidateOutput, warnings: &[ValidationWarning]) {
    println!("{} {}", "Validating:".cyan().bold(), manifest_path);
    if let Some(ref font_id) = output.font_id {
        println!("{} {}", "Font:".dimmed(), font_id);
    }
    if let Some(count) = output.glyph_count {
        println!("{} {}", "Glyphs:".dimmed(), count);
    }

    if !warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        reporting::print_warnings(warnings);
    }

    if output.success {
        println!("\n{} Manifest and descriptor are valid", "SUCCESS".green().bold());
    } else {
        println!("\n{}", "Errors:".red().bold());
        for error in &output.errors {
            let location = match (&error.path, error.line) {
                (Some(path), _) => format!(" at {}", path),
                (None, Some(line)) => format!(" at line {}", line),
                (None, None) => String::new(),
            };
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code,
                location.dimmed(),
                error.message
            );
        }
        println!("\n{}", "FAILED".red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "manifest_version": 1,
        "font_id": "font_16x8",
        "format": "row_major",
        "source": "bizcat.mem",
        "output": "font_16x8.c",
        "title": "BIZ Cat",
        "license": "CC0"
    }"#;

    fn mem_font(skip: Option<u32>) -> String {
        let mut text = String::from("// bizcat\n");
        for cp in 0x21..=0x7Eu32 {
            if Some(cp) == skip {
                continue;
            }
            text.push_str(&format!("// 0x{:02x}\n", cp));
            text.push_str(&"10000000\n".repeat(16));
        }
        text
    }

    fn setup(descriptor: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bizcat.font.json"), MANIFEST).unwrap();
        fs::write(tmp.path().join("bizcat.mem"), descriptor).unwrap();
        tmp
    }

    #[test]
    fn test_valid_font_writes_nothing() {
        let tmp = setup(&mem_font(None));
        let (output, warnings) = check(&tmp.path().join("bizcat.font.json"));
        assert!(output.success, "{:?}", output.errors);
        assert!(warnings.is_empty());
        assert_eq!(output.glyph_count, Some(94));
        assert!(!tmp.path().join("font_16x8.c").exists());
        assert!(!tmp.path().join("font_16x8.report.json").exists());
    }

    #[test]
    fn test_missing_glyph_is_reported() {
        let tmp = setup(&mem_font(Some(0x7E)));
        let (output, _) = check(&tmp.path().join("bizcat.font.json"));
        assert!(!output.success);
        assert_eq!(output.errors[0].code, "TABLE_001");
    }

    #[test]
    fn test_stray_line_is_warning() {
        let tmp = setup(&format!("{}garbage\n", mem_font(None)));
        let (output, warnings) = check(&tmp.path().join("bizcat.font.json"));
        assert!(output.success);
        assert_eq!(warnings.len(), 1);
        assert_eq!(output.warnings[0].code, "W003");
        assert_eq!(output.warnings[0].path.as_deref(), Some("line 1600"));
    }

    #[test]
    fn test_run_exit_codes() {
        let tmp = setup(&mem_font(None));
        let path = tmp.path().join("bizcat.font.json");
        assert_eq!(run(path.to_str().unwrap(), true).unwrap(), ExitCode::SUCCESS);

        fs::write(tmp.path().join("bizcat.mem"), "// bizcat\n").unwrap();
        assert_eq!(run(path.to_str().unwrap(), true).unwrap(), ExitCode::from(1));
    }
}
