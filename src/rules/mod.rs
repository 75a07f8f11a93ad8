//! Rule store: per-state pattern lists plus the trigger table, compiled once.
//!
//! The rule source is a YAML mapping from state name to a list of regular
//! expressions:
//!
//! ```yaml
//! GLOBAL:
//!   - '^hostname\s+\S+'
//! INTERFACE:
//!   - '^description\s+.*'
//! ```
//!
//! Declaration order is preserved for both states and patterns.

pub mod triggers;

use indexmap::IndexMap;
use regex::Regex;
use std::path::Path;

use crate::error::{RuleCompileError, RuleError, RuleLoadError};
use triggers::TriggerDef;

pub const GLOBAL_STATE: &str = "GLOBAL";

/// Rule set used when no rule file is configured.
pub const DEFAULT_RULES: &str = include_str!("../../rules/cisco.yaml");

/// State name to raw pattern strings, in declaration order.
pub type RawRules = IndexMap<String, Vec<String>>;

/// Result of looking a state up in the store.
#[derive(Debug, Clone, Copy)]
pub enum StateRules<'a> {
    Known(&'a [Regex]),
    /// The state was entered (usually by a trigger) but has no rules, so
    /// nothing in it can be valid.
    Unknown,
}

#[derive(Debug)]
pub struct RuleStore {
    rules: IndexMap<String, Vec<Regex>>,
    triggers: Vec<(Regex, String)>,
}

/// Parse a rule definition. A state declared without patterns gets an empty
/// list.
pub fn load(source: &str) -> Result<RawRules, RuleLoadError> {
    let parsed: Option<IndexMap<String, Option<Vec<String>>>> = serde_yaml::from_str(source)?;
    Ok(parsed
        .unwrap_or_default()
        .into_iter()
        .map(|(state, patterns)| (state, patterns.unwrap_or_default()))
        .collect())
}

pub fn load_file(path: &Path) -> Result<RawRules, RuleLoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| RuleLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load(&source)
}

fn compile_pattern(state: &str, pattern: &str) -> Result<Regex, RuleCompileError> {
    Regex::new(pattern).map_err(|cause| RuleCompileError {
        state: state.to_string(),
        pattern: pattern.to_string(),
        cause,
    })
}

impl RuleStore {
    /// Compile every rule pattern and every trigger. Fails on the first bad
    /// pattern; nothing is partially loaded.
    pub fn compile(raw: RawRules, triggers: &[TriggerDef]) -> Result<Self, RuleCompileError> {
        let mut rules = IndexMap::with_capacity(raw.len());
        for (state, patterns) in raw {
            let compiled = patterns
                .iter()
                .map(|p| compile_pattern(&state, p))
                .collect::<Result<Vec<_>, _>>()?;
            rules.insert(state, compiled);
        }

        let triggers = triggers
            .iter()
            .map(|t| Ok((compile_pattern(&t.state, &t.pattern)?, t.state.clone())))
            .collect::<Result<Vec<_>, RuleCompileError>>()?;

        tracing::debug!(
            states = rules.len(),
            triggers = triggers.len(),
            "compiled rule store"
        );

        Ok(Self { rules, triggers })
    }

    /// Load and compile in one step.
    pub fn from_source(source: &str, triggers: &[TriggerDef]) -> Result<Self, RuleError> {
        Ok(Self::compile(load(source)?, triggers)?)
    }

    pub fn from_file(path: &Path, triggers: &[TriggerDef]) -> Result<Self, RuleError> {
        Ok(Self::compile(load_file(path)?, triggers)?)
    }

    pub fn lookup(&self, state: &str) -> StateRules<'_> {
        match self.rules.get(state) {
            Some(patterns) => StateRules::Known(patterns),
            None => StateRules::Unknown,
        }
    }

    /// Target state of the first trigger matching `line`.
    pub fn trigger_for(&self, line: &str) -> Option<&str> {
        self.triggers
            .iter()
            .find(|(re, _)| re.is_match(line))
            .map(|(_, state)| state.as_str())
    }
}
