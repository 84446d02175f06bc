//! Verify command implementation
//!
//! Regenerates a font in memory and compares it with the C source on disk,
//! catching stale or hand-edited outputs.

use anyhow::{Context, Result};
use colored::Colorize;
use fontcol_spec::{content_hash, validate_manifest};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    backend_error_to_json, descriptor_read_to_json, error_codes, input_error_to_json,
    validation_error_to_json, JsonError, VerifyOutput,
};
use crate::dispatch::render_font;
use crate::input::{load_manifest, read_descriptor};

/// Run the verify command.
///
/// # Arguments
/// * `manifest_path` - Path to the `*.font.json` manifest
/// * `out_root` - Output root the font was generated into (default: current directory)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the file on disk matches, 1 on mismatch or error
pub fn run(manifest_path: &str, out_root: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let out_root = out_root.unwrap_or(".");
    let output = verify(Path::new(manifest_path), Path::new(out_root));

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        print_human(manifest_path, &output);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn verify(manifest_path: &Path, out_root: &Path) -> VerifyOutput {
    let mut output = VerifyOutput {
        success: false,
        errors: Vec::new(),
        font_id: None,
        output_path: None,
        expected_hash: None,
        actual_hash: None,
    };
    let file = manifest_path.display().to_string();

    let loaded = match load_manifest(manifest_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            output.errors.push(input_error_to_json(&e, Some(&file)));
            return output;
        }
    };
    let manifest = loaded.manifest;
    output.font_id = Some(manifest.font_id.clone());
    output.output_path = Some(manifest.output.clone());

    let validation = validate_manifest(&manifest);
    if !validation.is_ok() {
        output
            .errors
            .extend(validation.errors.iter().map(validation_error_to_json));
        return output;
    }

    let descriptor = match read_descriptor(&manifest, &loaded.manifest_dir) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            output
                .errors
                .push(descriptor_read_to_json(&e, &manifest.source));
            return output;
        }
    };

    let rendered = match render_font(&manifest, &descriptor.text) {
        Ok(rendered) => rendered,
        Err(e) => {
            output
                .errors
                .push(backend_error_to_json(&e, e.line()).with_file(&manifest.source));
            return output;
        }
    };
    output.expected_hash = Some(rendered.source.hash.clone());

    let on_disk_path = out_root.join(&manifest.output);
    let on_disk = match fs::read(&on_disk_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            output.errors.push(
                JsonError::new(
                    error_codes::OUTPUT_MISSING,
                    format!("cannot read generated source: {}", e),
                )
                .with_file(on_disk_path.display().to_string()),
            );
            return output;
        }
    };
    let actual_hash = content_hash(&on_disk);
    output.actual_hash = Some(actual_hash.clone());

    if actual_hash == rendered.source.hash {
        output.success = true;
    } else {
        let line = first_differing_line(rendered.source.source.as_bytes(), &on_disk);
        output.errors.push(
            JsonError::new(
                error_codes::OUTPUT_MISMATCH,
                format!(
                    "generated source is out of date; first difference on line {}",
                    line
                ),
            )
            .with_file(on_disk_path.display().to_string())
            .with_line(line),
        );
    }
    output
}

/// 1-based line of the first byte where `expected` and `actual` differ.
fn first_differing_line(expected: &[u8], actual: &[u8]) -> usize {
    let offset = expected
        .iter()
        .zip(actual)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    1 + expected[..offset].iter().filter(|&&b| b == b'\n').count()
}

fn print_human(manifest_path: &str, output: &VerifyOutput) {
    println!("{} {}", "Verifying:".cyan().bold(), manifest_path);
    if let Some(ref path) = output.output_path {
        println!("{} {}", "Output:".dimmed(), path);
    }
    if let Some(ref hash) = output.expected_hash {
        println!("{} {}", "Expected:".dimmed(), &hash[..16]);
    }
    if let Some(ref hash) = output.actual_hash {
        println!("{} {}", "On disk:".dimmed(), &hash[..16]);
    }

    if output.success {
        println!("\n{} Output matches a fresh render", "PASSED".green().bold());
        return;
    }

    for error in &output.errors {
        println!("  {} [{}]: {}", "x".red(), error.code, error.message);
    }
    println!("\n{}", "FAILED".red().bold());
}
