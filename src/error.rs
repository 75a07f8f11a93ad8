use std::path::PathBuf;

use thiserror::Error;

/// The rule source could not be read or parsed.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("failed to read rule file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule definitions")]
    Parse(#[from] serde_yaml::Error),
}

/// A pattern (rule or trigger) failed to compile. Compilation stops at the
/// first one of these.
#[derive(Debug, Error)]
#[error("failed to compile regex '{pattern}' for state '{state}'")]
pub struct RuleCompileError {
    pub state: String,
    pub pattern: String,
    #[source]
    pub cause: regex::Error,
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error(transparent)]
    Load(#[from] RuleLoadError),

    #[error(transparent)]
    Compile(#[from] RuleCompileError),
}
