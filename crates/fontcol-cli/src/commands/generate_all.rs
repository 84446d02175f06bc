//! Generate-all command implementation
//!
//! Generates every `*.font.json` manifest found under a directory. A failed
//! font does not stop the others; the exit code reports whether any failed.

use anyhow::{Context, Result};
use colored::Colorize;
use fontcol_spec::MANIFEST_SUFFIX;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use walkdir::WalkDir;

use super::generate::{execute, GenerateOutcome};
use super::json_output::{GenerateAllOutput, JsonError, ManifestResult};

/// Run the generate-all command
///
/// # Arguments
/// * `manifest_dir` - Directory searched recursively for manifests
/// * `out_root` - Output root directory (default: current directory)
/// * `verbose` - Whether to print one line per font instead of progress dots
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 if any font failed
pub fn run(
    manifest_dir: &str,
    out_root: Option<&str>,
    verbose: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let out_root = out_root.unwrap_or(".");
    let dir_path = Path::new(manifest_dir);
    let out_path = Path::new(out_root);

    if !dir_path.is_dir() {
        anyhow::bail!("Manifest directory does not exist: {}", manifest_dir);
    }
    fs::create_dir_all(out_path)
        .with_context(|| format!("Failed to create output directory: {}", out_root))?;

    let manifests = find_manifests(dir_path);

    if !json_output {
        println!("{}", "======================================".cyan());
        println!("{}", "  fontcol Batch Generator".cyan());
        println!("{}", "======================================".cyan());
        println!();
        println!("{} {}", "Manifest directory:".blue().bold(), manifest_dir);
        println!("{} {}", "Output directory:".blue().bold(), out_root);
        println!(
            "{} Found {} manifests to process",
            "INFO".blue().bold(),
            manifests.len()
        );
        println!();
    }

    let mut results: Vec<ManifestResult> = Vec::new();
    for manifest_path in &manifests {
        let outcome = execute(manifest_path, out_path)?;
        let result = manifest_result(manifest_path, &outcome);

        if !json_output {
            print_progress(&result, verbose);
        }
        results.push(result);
    }

    if !json_output && !verbose && !results.is_empty() {
        println!();
    }

    let successful = results.iter().filter(|r| r.success).count();
    let failed = results.len() - successful;
    let output = GenerateAllOutput {
        success: failed == 0,
        total: results.len(),
        successful,
        failed,
        results,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    if json_output {
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        print_summary(&output, verbose);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Manifests under `dir`, sorted for a deterministic processing order.
pub fn find_manifests(dir: &Path) -> Vec<PathBuf> {
    let mut manifests: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(MANIFEST_SUFFIX))
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    manifests.sort();
    manifests
}

fn manifest_result(manifest_path: &Path, outcome: &GenerateOutcome) -> ManifestResult {
    ManifestResult {
        manifest_path: manifest_path.display().to_string(),
        font_id: outcome.font_id.clone(),
        success: outcome.is_success(),
        errors: outcome.errors.clone(),
        warning_count: outcome.warnings.len(),
        output_hash: outcome.output.as_ref().map(|o| o.hash.clone()),
        duration_ms: outcome.duration_ms,
    }
}

fn print_progress(result: &ManifestResult, verbose: bool) {
    let name = result
        .font_id
        .as_deref()
        .unwrap_or(result.manifest_path.as_str());

    if result.success {
        if verbose {
            let warnings = if result.warning_count > 0 {
                format!(" {} warning(s)", result.warning_count)
            } else {
                String::new()
            };
            println!(
                "  {} {} ({}ms){}",
                "SUCCESS".green(),
                name,
                result.duration_ms,
                warnings.yellow()
            );
        } else {
            print!("{}", ".".green());
        }
    } else if verbose {
        println!(
            "  {} {} - {}",
            "FAILED".red(),
            name,
            first_error(&result.errors)
        );
    } else {
        print!("{}", "x".red());
    }
}

fn first_error(errors: &[JsonError]) -> String {
    errors
        .first()
        .map(|e| format!("[{}] {}", e.code, e.message))
        .unwrap_or_else(|| "unknown error".to_string())
}

fn print_summary(output: &GenerateAllOutput, verbose: bool) {
    println!();
    println!("{}", "======================================".cyan());
    println!("{}", "  Summary".cyan());
    println!("{}", "======================================".cyan());
    println!("{} {}", "Total:".bold(), output.total);
    println!("{} {}", "Successful:".green().bold(), output.successful);
    if output.failed > 0 {
        println!("{} {}", "Failed:".red().bold(), output.failed);
        if !verbose {
            for result in output.results.iter().filter(|r| !r.success) {
                println!(
                    "  {} {} - {}",
                    "x".red(),
                    result.manifest_path,
                    first_error(&result.errors)
                );
            }
        }
    }
    println!(
        "{} {:.2}s",
        "Runtime:".dimmed(),
        output.duration_ms as f64 / 1000.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_manifests_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("b")).unwrap();
        fs::write(tmp.path().join("b/z.font.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.font.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.report.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.json"), "{}").unwrap();

        let found = find_manifests(tmp.path());
        assert_eq!(
            found,
            vec![tmp.path().join("a.font.json"), tmp.path().join("b/z.font.json")]
        );
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.font.json"), "not json").unwrap();
        fs::write(tmp.path().join("b.font.json"), "{").unwrap();
        let out = tmp.path().join("out");

        let code = run(
            tmp.path().to_str().unwrap(),
            Some(out.to_str().unwrap()),
            false,
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(run(missing.to_str().unwrap(), None, false, true).is_err());
    }
}
