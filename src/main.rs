//! Lockman CLI entry point.
//!
//! Parses arguments, installs logging, dispatches to the command handler, and
//! maps errors to exit codes.

use lockman::cli::Cli;
use lockman::error::LockmanError;
use lockman::{commands, exit_codes};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `LOCKMAN_LOG=debug`).
const LOG_ENV: &str = "LOCKMAN_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // The child already reported its own failure.
            if !matches!(err, LockmanError::CommandFailed(_)) {
                eprintln!("Error: {}", err);
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
