use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::fsm::LineError;
use crate::json::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Configuration input with no findings.
    Success,
    /// JSON input with no findings.
    Valid,
    Failed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Status::Success => "success",
            Status::Valid => "valid",
            Status::Failed => "failed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Line(LineError),
    Structural(ValidationError),
}

impl Finding {
    pub fn line(&self) -> usize {
        match self {
            Finding::Line(e) => e.line_number,
            Finding::Structural(e) => e.line,
        }
    }
}

/// Line findings serialize as their one-line message, structural findings as
/// the full detail object.
impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Finding::Line(e) => serializer.collect_str(e),
            Finding::Structural(e) => e.serialize(serializer),
        }
    }
}

/// Extra detail attached to a valid JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureSummary {
    pub pda_stack_state: Vec<String>,
    pub token_count: usize,
    pub line_count: usize,
    pub max_depth: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub status: Status,
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Finding>,
    #[serde(flatten)]
    pub structure: Option<StructureSummary>,
}

impl Report {
    pub fn from_line_errors(file: &Path, errors: Vec<LineError>) -> Self {
        Self {
            status: if errors.is_empty() {
                Status::Success
            } else {
                Status::Failed
            },
            file: file.to_path_buf(),
            errors: errors.into_iter().map(Finding::Line).collect(),
            structure: None,
        }
    }

    pub fn structural_failure(file: &Path, errors: Vec<ValidationError>) -> Self {
        Self {
            status: Status::Failed,
            file: file.to_path_buf(),
            errors: errors.into_iter().map(Finding::Structural).collect(),
            structure: None,
        }
    }

    pub fn structurally_valid(file: &Path, summary: StructureSummary) -> Self {
        Self {
            status: Status::Valid,
            file: file.to_path_buf(),
            errors: Vec::new(),
            structure: Some(summary),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: Vec<Report>,
}

impl RunResult {
    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failed()).count()
    }

    pub fn finding_count(&self) -> usize {
        self.reports.iter().map(|r| r.errors.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.reports.iter().any(Report::is_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::ErrorKind;

    fn line_error(line_number: usize) -> LineError {
        LineError {
            line_number,
            offending_text: "bogus".to_string(),
            state: "GLOBAL".to_string(),
        }
    }

    fn structural_error() -> ValidationError {
        ValidationError {
            error_type: ErrorKind::MissingComma,
            position: 8,
            line: 1,
            stack_snapshot: vec!["{".to_string()],
            suggestion: "insert ',' before \"b\"".to_string(),
        }
    }

    #[test]
    fn test_config_report_status() {
        let ok = Report::from_line_errors(Path::new("a.cfg"), vec![]);
        assert_eq!(ok.status, Status::Success);
        assert!(!ok.is_failed());

        let bad = Report::from_line_errors(Path::new("a.cfg"), vec![line_error(3)]);
        assert_eq!(bad.status, Status::Failed);
        assert_eq!(bad.errors[0].line(), 3);
    }

    #[test]
    fn test_success_report_omits_errors() {
        let report = Report::from_line_errors(Path::new("a.cfg"), vec![]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("errors").is_none());
        assert!(json.get("token_count").is_none());
    }

    #[test]
    fn test_line_finding_serializes_as_message() {
        let report = Report::from_line_errors(Path::new("a.cfg"), vec![line_error(2)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(
            json["errors"][0],
            "Line 2: invalid command 'bogus' in state GLOBAL"
        );
    }

    #[test]
    fn test_structural_finding_serializes_as_object() {
        let report = Report::structural_failure(Path::new("a.json"), vec![structural_error()]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["errors"][0]["error_type"], "MissingComma");
        assert_eq!(json["errors"][0]["pda_stack_state"][0], "{");
    }

    #[test]
    fn test_valid_report_flattens_summary() {
        let report = Report::structurally_valid(
            Path::new("a.json"),
            StructureSummary {
                pda_stack_state: vec![],
                token_count: 9,
                line_count: 1,
                max_depth: 2,
                message: "JSON structure is valid".to_string(),
            },
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "valid");
        assert_eq!(json["token_count"], 9);
        assert_eq!(json["pda_stack_state"], serde_json::json!([]));
        assert!(json.get("structure").is_none());
    }

    #[test]
    fn test_run_result_counts() {
        let result = RunResult {
            reports: vec![
                Report::from_line_errors(Path::new("a"), vec![line_error(1), line_error(2)]),
                Report::from_line_errors(Path::new("b"), vec![]),
                Report::structural_failure(Path::new("c"), vec![structural_error()]),
            ],
        };
        assert_eq!(result.failed_count(), 2);
        assert_eq!(result.finding_count(), 3);
        assert!(result.has_failures());
        assert!(!RunResult::default().has_failures());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Success.to_string(), "success");
        assert_eq!(Status::Valid.to_string(), "valid");
        assert_eq!(Status::Failed.to_string(), "failed");
    }
}
