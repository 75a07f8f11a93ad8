use anyhow::Result;
use automalint::cli::{Cli, CommonArgs, Commands};
use automalint::config::{Config, CONFIG_FILE};
use automalint::engine;
use automalint::types::RunResult;

use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("automalint=debug")
    } else {
        EnvFilter::try_from_env("AUTOMALINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn finish(result: &RunResult, common: &CommonArgs, project_root: &Path, cfg: &Config) -> Result<()> {
    let output_format = common.format.unwrap_or(cfg.format);
    automalint::cli::output::render(result, project_root, output_format)?;

    if let Some(out) = &common.out {
        automalint::cli::output::write_report(result, project_root, out)?;
    }

    if result.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let project_root = std::env::current_dir()?;

    match cli.command {
        Commands::Config {
            inputs,
            rules,
            common,
        } => {
            let cfg = Config::load(common.config.as_deref(), &project_root)?;
            let result = engine::run_config(&inputs, &cfg, rules.as_deref())?;
            finish(&result, &common, &project_root, &cfg)?;
        }
        Commands::Json { inputs, common } => {
            let cfg = Config::load(common.config.as_deref(), &project_root)?;
            let result = engine::run_json(&inputs, &cfg)?;
            finish(&result, &common, &project_root, &cfg)?;
        }
        Commands::Init => {
            let path = project_root.join(CONFIG_FILE);
            if path.exists() {
                eprintln!("{CONFIG_FILE} already exists");
                std::process::exit(1);
            }
            std::fs::write(&path, Config::default_toml())?;
            println!("Created {CONFIG_FILE}");
        }
        Commands::Explain { kind: None } => {
            println!("{}", automalint::cli::explain::list_kinds());
        }
        Commands::Explain { kind: Some(kind) } => {
            use automalint::cli::explain::{explain, list_kinds};
            match explain(&kind) {
                Some(text) => println!("{text}"),
                None => {
                    eprintln!("Unknown error kind: {kind}\n");
                    eprintln!("{}", list_kinds());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup failures (unreadable input, bad rules, limits) produce no report.
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}
