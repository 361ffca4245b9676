//! Command-line parsing and interactive prompts.
//!
//! Flags are optional: running `bikeshare` with no arguments starts the
//! interactive session against CSV files in the current directory.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_PREVIEW_ROWS;

pub mod filters;
pub mod prompt;

pub use filters::collect_filters;
pub use prompt::Prompter;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bikeshare", version, about = "Explore US bikeshare trip data")]
pub struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv.
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Number of rows shown when previewing individual trips.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,
}
