use owo_colors::OwoColorize;
use std::path::Path;

use crate::types::{Finding, Report, RunResult, Status};

pub fn render(result: &RunResult, project_root: &Path) {
    println!();
    for report in &result.reports {
        render_report(report, project_root);
    }

    let inputs = result.reports.len();
    let failed = result.failed_count();

    println!("  {}", "\u{2501}".repeat(50).dimmed());
    if failed == 0 {
        println!("  {}", format!("all {inputs} inputs valid").green());
    } else {
        println!(
            "  {} in {} of {} inputs",
            format!("{} findings", result.finding_count()).red().bold(),
            failed.bold(),
            inputs
        );
    }
    println!();
}

fn render_report(report: &Report, project_root: &Path) {
    let rel = super::relative_path(&report.file, project_root);

    match report.status {
        Status::Success | Status::Valid => {
            let detail = report
                .structure
                .as_ref()
                .map(|s| {
                    format!(
                        " ({} tokens, {} lines, depth {})",
                        s.token_count, s.line_count, s.max_depth
                    )
                })
                .unwrap_or_default();
            println!(
                "  {} {} {}{}",
                "\u{2713}".green(),
                rel.bold(),
                report.status.green(),
                detail.dimmed()
            );
        }
        Status::Failed => {
            println!(
                "  {} {} {}",
                "\u{2717}".red(),
                rel.bold(),
                format!("({})", report.errors.len()).dimmed()
            );
            for finding in &report.errors {
                render_finding(finding);
            }
        }
    }
}

fn render_finding(finding: &Finding) {
    match finding {
        Finding::Line(e) => {
            println!(
                "      L{:<4} {} {}",
                e.line_number,
                format!("[{}]", e.state).yellow(),
                e.offending_text
            );
        }
        Finding::Structural(e) => {
            let stack = if e.stack_snapshot.is_empty() {
                "empty".to_string()
            } else {
                e.stack_snapshot.join(" ")
            };
            println!(
                "      L{:<4} {} {}",
                e.line,
                e.error_type.red(),
                format!("at byte {}, stack: {stack}", e.position).dimmed()
            );
            println!("            {}", e.suggestion);
        }
    }
}
