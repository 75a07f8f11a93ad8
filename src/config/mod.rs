use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::rules::triggers::TriggerDef;

pub const CONFIG_FILE: &str = ".automalintrc.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    /// Rule file for configuration validation. Relative paths resolve
    /// against the directory holding the config file.
    pub rules: Option<PathBuf>,
    pub limits: LimitsConfig,
    /// Extra block triggers, evaluated after the built-in ones.
    pub triggers: Vec<TriggerDef>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_lines: Option<usize>,
    pub max_tokens: Option<usize>,
}

impl Config {
    pub fn load(config_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let path = config_path.map(Path::to_path_buf).or_else(|| {
            let default = project_root.join(CONFIG_FILE);
            default.exists().then_some(default)
        });

        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                let mut config: Config = toml::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Config parse error in {}: {e}", path.display()))?;
                config.base_dir = path.parent().map(Path::to_path_buf);
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }

    pub fn rules_path(&self) -> Option<PathBuf> {
        self.rules.as_ref().map(|rules| match &self.base_dir {
            Some(base) if rules.is_relative() => base.join(rules),
            _ => rules.clone(),
        })
    }

    pub const fn default_toml() -> &'static str {
        r#"# automalint configuration

# Output format when --format is not given: "text", "json" or "github"
format = "text"

# Rule file for `automalint config` (YAML: state name -> list of regexes).
# Relative to this file. When unset, the built-in Cisco IOS rules are used.
# rules = "rules.yaml"

[limits]
# Abort a configuration input longer than this many lines.
# max_lines = 100000
# Abort a JSON input with more than this many tokens.
# max_tokens = 1000000

# Extra block triggers, tried after the built-in ones in file order.
# [[triggers]]
# pattern = "^policy-map\\s+.*"
# state = "POLICY_MAP"
"#
    }
}
