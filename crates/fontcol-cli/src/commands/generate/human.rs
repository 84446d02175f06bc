//! Human-readable (colored) output mode for the generate command.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::{execute, GenerateOutcome, GenerateStatus};
use crate::commands::reporting;

/// Run generate with human-readable (colored) output.
pub fn run_human(manifest_path: &str, out_root: &str) -> Result<ExitCode> {
    println!("{} {}", "Generating from:".cyan().bold(), manifest_path);
    println!("{} {}", "Output root:".cyan().bold(), out_root);

    let outcome = execute(Path::new(manifest_path), Path::new(out_root))?;
    print_outcome(&outcome);

    Ok(ExitCode::from(outcome.status.exit_code()))
}

fn print_outcome(outcome: &GenerateOutcome) {
    if let Some(ref hash) = outcome.source_hash {
        println!("{} {}", "Descriptor:".dimmed(), &hash[..16]);
    }

    if !outcome.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        reporting::print_warnings(&outcome.warnings);
    }

    match outcome.status {
        GenerateStatus::Success => {
            if let Some(ref output) = outcome.output {
                println!(
                    "\n{} {} ({} bytes, {})",
                    "Wrote".green().bold(),
                    output.path,
                    output.size_bytes,
                    &output.hash[..16]
                );
            }
            if let Some(count) = outcome.glyph_count {
                println!("  {} {}", "Glyphs:".dimmed(), count);
            }
        }
        GenerateStatus::ManifestError | GenerateStatus::GenerationError => {
            let heading = if outcome.status == GenerateStatus::ManifestError {
                "Manifest errors:"
            } else {
                "Generation failed:"
            };
            println!("\n{}", heading.red().bold());
            for error in &outcome.errors {
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
        }
    }

    if let Some(ref path) = outcome.report_path {
        println!("{} {}", "Report:".dimmed(), path.display());
    }
    println!("{} {}ms", "Done in".dimmed(), outcome.duration_ms);
}
