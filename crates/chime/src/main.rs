// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chime - rule-based chat notification router.
//!
//! This is the command-line entry point: it loads the configuration,
//! assembles the engine and runs one of the subcommands.

mod check;
mod pattern;
mod route;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chime_core::ChimeError;
use clap::{Parser, Subcommand};
use thiserror::Error;

/// Chime - rule-based chat notification router.
#[derive(Parser, Debug)]
#[command(name = "chime", version, about, long_about = None)]
struct Cli {
    /// Read this config file instead of the standard lookup.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration and show the assembled engine.
    Check,
    /// Route raw events read from stdin, one tab-separated line each.
    Route,
    /// Test a pattern against sample texts.
    Match {
        /// `exact:`, `re:` or glob pattern, optionally prefixed with `cs:` or `ic:`.
        pattern: String,
        /// Texts to try.
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Chime(#[from] ChimeError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => chime_config::load_and_validate_path(path),
        None => chime_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            chime_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.engine.log_level);

    let stdout = io::stdout().lock();
    let result = match cli.command {
        Commands::Check => check::run(&config, stdout),
        Commands::Route => route::run(&config, io::stdin().lock(), stdout),
        Commands::Match { pattern, texts } => {
            pattern::run(&pattern, &texts, config.engine.ignore_case, stdout)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("chime: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise Chime's crates log at the configured level
/// and everything else at `warn`. Logs go to stderr, results to stdout.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chime={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}
