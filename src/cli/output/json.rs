use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::types::{Finding, RunResult, Status, StructureSummary};

#[derive(Serialize)]
struct JsonOutput<'a> {
    reports: Vec<JsonReport<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: Status,
    file: String,
    #[serde(skip_serializing_if = "<[Finding]>::is_empty")]
    errors: &'a [Finding],
    #[serde(flatten)]
    structure: &'a Option<StructureSummary>,
}

#[derive(Serialize)]
struct JsonSummary {
    inputs: usize,
    failed: usize,
    findings: usize,
}

fn build_output<'a>(result: &'a RunResult, project_root: &Path) -> JsonOutput<'a> {
    let reports = result
        .reports
        .iter()
        .map(|r| JsonReport {
            status: r.status,
            file: super::relative_path(&r.file, project_root),
            errors: &r.errors,
            structure: &r.structure,
        })
        .collect();

    JsonOutput {
        reports,
        summary: JsonSummary {
            inputs: result.reports.len(),
            failed: result.failed_count(),
            findings: result.finding_count(),
        },
    }
}

pub fn to_string(result: &RunResult, project_root: &Path) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build_output(
        result,
        project_root,
    ))?)
}

pub fn render(result: &RunResult, project_root: &Path) -> Result<()> {
    println!("{}", to_string(result, project_root)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::LineError;
    use crate::types::Report;

    #[test]
    fn test_json_output_is_valid() {
        let result = RunResult {
            reports: vec![
                Report::from_line_errors(
                    Path::new("/project/router.cfg"),
                    vec![LineError {
                        line_number: 4,
                        offending_text: "bogus".to_string(),
                        state: "INTERFACE".to_string(),
                    }],
                ),
                Report::from_line_errors(Path::new("/project/switch.cfg"), vec![]),
            ],
        };

        let json = to_string(&result, Path::new("/project")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["inputs"], 2);
        assert_eq!(parsed["summary"]["failed"], 1);
        assert_eq!(parsed["summary"]["findings"], 1);
        assert_eq!(parsed["reports"][0]["file"], "router.cfg");
        assert_eq!(parsed["reports"][0]["status"], "failed");
        assert_eq!(
            parsed["reports"][0]["errors"][0],
            "Line 4: invalid command 'bogus' in state INTERFACE"
        );
        assert!(parsed["reports"][1].get("errors").is_none());
    }
}
