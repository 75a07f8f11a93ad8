use std::path::Path;

use crate::types::{Finding, RunResult};

pub fn render(result: &RunResult, project_root: &Path) {
    for report in &result.reports {
        let rel = super::relative_path(&report.file, project_root);
        for finding in &report.errors {
            let (title, message) = match finding {
                Finding::Line(e) => (
                    format!("invalid-command ({})", e.state),
                    format!("invalid command '{}'", e.offending_text),
                ),
                Finding::Structural(e) => (e.error_type.to_string(), e.suggestion.clone()),
            };
            println!(
                "::error file={rel},line={line},title={title}::{message}",
                line = finding.line(),
            );
        }
    }
}
