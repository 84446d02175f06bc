//! JSON output mode for the generate command.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;

use super::{execute, GenerateOutcome};
use crate::commands::json_output::{validation_warning_to_json, GenerateOutput};

/// Run generate with machine-readable JSON output.
pub fn run_json(manifest_path: &str, out_root: &str) -> Result<ExitCode> {
    let outcome = execute(Path::new(manifest_path), Path::new(out_root))?;
    let exit_code = outcome.status.exit_code();

    let json = serde_json::to_string_pretty(&to_output(outcome))
        .context("Failed to serialize output")?;
    println!("{}", json);

    Ok(ExitCode::from(exit_code))
}

pub(super) fn to_output(outcome: GenerateOutcome) -> GenerateOutput {
    GenerateOutput {
        success: outcome.is_success(),
        exit_code: outcome.status.exit_code(),
        errors: outcome.errors,
        warnings: outcome
            .warnings
            .iter()
            .map(validation_warning_to_json)
            .collect(),
        font_id: outcome.font_id,
        manifest_hash: outcome.manifest_hash,
        source_hash: outcome.source_hash,
        output: outcome.output,
        report_path: outcome
            .report_path
            .map(|p| p.to_string_lossy().to_string()),
        duration_ms: outcome.duration_ms,
    }
}
