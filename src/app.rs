//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - loads `.env` and parses CLI flags into an `ExplorerConfig`
//! - wires stdin/stdout into the interactive session loop

use std::io;

use clap::Parser;

use crate::cli::{Cli, Prompter};
use crate::config::ExplorerConfig;
use crate::error::AppError;

pub mod session;

/// Entry point for the `bikeshare` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // `.env` must be loaded before clap reads `BIKESHARE_DATA_DIR`.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            log::warn!("ignoring unreadable .env file: {err}");
        }
    }

    let cli = Cli::parse();
    let config = config_from_cli(&cli);
    log::debug!(
        "data_dir={} preview_rows={}",
        config.data_dir.display(),
        config.preview_rows
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    session::run_sessions(&mut prompter, &config)
}

pub fn config_from_cli(cli: &Cli) -> ExplorerConfig {
    ExplorerConfig::new(cli.data_dir.clone(), cli.preview_rows)
}
