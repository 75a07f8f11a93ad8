use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::{Config, LimitsConfig};
use crate::fsm;
use crate::json::{self, BracketStack, Eof, Tokenizer};
use crate::rules::triggers::trigger_table;
use crate::rules::{RuleStore, DEFAULT_RULES};
use crate::types::{Report, RunResult, StructureSummary};

/// Compile the rule store for configuration validation. An explicit
/// `rules_override` wins over the config file; with neither, the built-in
/// rule set is used.
pub fn build_rule_store(config: &Config, rules_override: Option<&Path>) -> Result<RuleStore> {
    let triggers = trigger_table(&config.triggers);
    match rules_override.map(Path::to_path_buf).or_else(|| config.rules_path()) {
        Some(path) => RuleStore::from_file(&path, &triggers)
            .with_context(|| format!("failed to load rules from {}", path.display())),
        None => RuleStore::from_source(DEFAULT_RULES, &triggers)
            .context("failed to compile the built-in rules"),
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn check_config(path: &Path, store: &RuleStore, limits: LimitsConfig) -> Result<Report> {
    let text = read_input(path)?;
    if let Some(max) = limits.max_lines.filter(|&max| text.lines().nth(max).is_some()) {
        tracing::warn!(file = %path.display(), max, "line limit exceeded");
        anyhow::bail!(
            "{} exceeds the limit of {max} lines; raise [limits] max_lines to validate it",
            path.display()
        );
    }

    let errors = fsm::run(store, &text);
    tracing::info!(
        file = %path.display(),
        errors = errors.len(),
        "validated configuration"
    );
    Ok(Report::from_line_errors(path, errors))
}

pub fn check_json(path: &Path, limits: LimitsConfig) -> Result<Report> {
    let text = read_input(path)?;
    let tokenizer = Tokenizer::new(&text);
    let tokens: Vec<_> = match limits.max_tokens {
        Some(max) => {
            let tokens: Vec<_> = tokenizer.take(max.saturating_add(1)).collect();
            if tokens.len() > max {
                tracing::warn!(file = %path.display(), max, "token limit exceeded");
                anyhow::bail!(
                    "{} exceeds the limit of {max} tokens; raise [limits] max_tokens to validate it",
                    path.display()
                );
            }
            tokens
        }
        None => tokenizer.collect(),
    };

    let outcome = json::pda::validate(&tokens, Eof::of(&text));
    tracing::info!(
        file = %path.display(),
        tokens = tokens.len(),
        errors = outcome.errors.len(),
        "validated json"
    );

    if !outcome.is_valid() {
        return Ok(Report::structural_failure(path, outcome.errors));
    }

    let stack = BracketStack::replay(&tokens);
    Ok(Report::structurally_valid(
        path,
        StructureSummary {
            pda_stack_state: stack.snapshot(),
            token_count: tokens.len(),
            line_count: json::line_count(&text),
            max_depth: stack.max_depth(),
            message: "JSON structure is valid".to_string(),
        },
    ))
}

/// Validate each configuration input with its own automaton. Fails as a whole
/// on the first setup error (unreadable rules or input, limit exceeded).
pub fn run_config(
    inputs: &[PathBuf],
    config: &Config,
    rules_override: Option<&Path>,
) -> Result<RunResult> {
    let store = build_rule_store(config, rules_override)?;
    let reports = inputs
        .par_iter()
        .map(|path| check_config(path, &store, config.limits))
        .collect::<Result<Vec<_>>>()?;
    Ok(RunResult { reports })
}

pub fn run_json(inputs: &[PathBuf], config: &Config) -> Result<RunResult> {
    let reports = inputs
        .par_iter()
        .map(|path| check_json(path, config.limits))
        .collect::<Result<Vec<_>>>()?;
    Ok(RunResult { reports })
}
