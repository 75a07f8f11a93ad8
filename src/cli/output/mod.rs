pub mod github;
pub mod json;
pub mod text;

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::types::RunResult;

pub fn render(result: &RunResult, project_root: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => text::render(result, project_root),
        OutputFormat::Json => json::render(result, project_root)?,
        OutputFormat::Github => github::render(result, project_root),
    }
    Ok(())
}

/// Persist the JSON report. Runs after rendering so a write failure still
/// leaves the findings on screen.
pub fn write_report(result: &RunResult, project_root: &Path, out: &Path) -> Result<()> {
    let body = json::to_string(result, project_root)?;
    std::fs::write(out, body + "\n")
        .with_context(|| format!("failed to write report to {}", out.display()))?;
    tracing::info!(path = %out.display(), "saved report");
    Ok(())
}

fn relative_path(file: &Path, project_root: &Path) -> String {
    file.strip_prefix(project_root)
        .unwrap_or(file)
        .display()
        .to_string()
}
