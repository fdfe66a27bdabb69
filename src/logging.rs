//! Diagnostic output using the `tracing` ecosystem.
//!
//! Everything is written to stderr; stdout carries only the composed
//! environment in print mode.

use std::io::IsTerminal;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::Error;

/// Installs the global subscriber at `level`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(level: LevelFilter) -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter(level))
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(Error::Logging)
}

fn filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(level.to_string())
}
