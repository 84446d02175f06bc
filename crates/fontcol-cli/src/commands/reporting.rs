use anyhow::{Context, Result};
use colored::Colorize;
use fontcol_spec::{Report, ValidationWarning};
use std::fs;
use std::path::{Path, PathBuf};

/// Report path for a font: `<font_id>.report.json` next to its manifest.
pub(crate) fn report_path(manifest_path: &Path, font_id: &str) -> PathBuf {
    let manifest_dir = manifest_path.parent().unwrap_or(Path::new("."));
    manifest_dir.join(format!("{}.report.json", font_id))
}

pub(crate) fn write_report(report: &Report, path: &Path) -> Result<()> {
    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to: {}", path.display()))?;
    Ok(())
}

pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    for warning in warnings {
        let location = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code,
            location.dimmed(),
            warning.message
        );
    }
}
