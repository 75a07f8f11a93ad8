pub mod explain;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "automalint",
    version,
    about = "Automaton-based validation for Cisco-style configuration and JSON text"
)]
pub struct Cli {
    /// Log automaton decisions to stderr (same as AUTOMALINT_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration files line by line against per-block rules
    Config {
        /// Configuration files to validate
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// YAML rule file (overrides `rules` from the config file)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Validate the bracket structure and grammar of JSON files
    Json {
        /// JSON files to validate
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Create a default .automalintrc.toml
    Init,
    /// Explain an error kind (omit to list all)
    Explain {
        /// Error kind (e.g., TrailingComma, mismatched-bracket, invalid-command)
        kind: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Output format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write the JSON report to this file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}
