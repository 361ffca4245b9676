//! `bikeshare-explorer` library crate.
//!
//! The binary (`bikeshare`) is a thin wrapper around this library so that:
//!
//! - the prompt loop, loader and reporters are testable without spawning processes
//! - console wording stays in one place (`report::format`)

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;

#[cfg(test)]
pub(crate) mod testutil;
