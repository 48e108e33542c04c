//! Daigest CLI entrypoint producing a weekly work digest.

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Local;
use daigest::{DaigestConfig, DigestError};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DigestError> {
    let config = load_config()?;
    let range = config.date_range(Local::now().date_naive())?;

    if config.activity_only {
        return cli::activity_report::run(&config, &range);
    }
    cli::summary::run(&config, &range)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`DigestError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<DaigestConfig, DigestError> {
    DaigestConfig::load().map_err(|error| DigestError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to warnings.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
