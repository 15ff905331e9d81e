use std::env;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{AppError, Result, config::LogLevel};

const LOG_FORMAT_VAR: &str = "FUSEDLOC_LOG_FORMAT";

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

fn json_requested() -> bool {
    env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json")
}

/// Initialize tracing for one-shot CLI commands
///
/// Logs go to stderr so command output on stdout stays clean.
/// Uses RUST_LOG if set, otherwise the configured level.
/// Set FUSEDLOC_LOG_FORMAT=json for JSON output.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init_cli_mode(level: LogLevel) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    let result = if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| AppError::Logging(e.to_string()))
}

/// Initialize tracing with file output
///
/// Similar to init_cli_mode() but also writes logs to a daily rotated file
/// in the fusedloc logs directory. Used by long-running commands.
///
/// # Errors
/// Returns error if the log directory cannot be created or a global
/// subscriber is already installed
pub fn init_with_file(level: LogLevel) -> Result<()> {
    const DAYS_TO_KEEP: usize = 7;

    let log_dir = crate::config::ConfigPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("fusedloc")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| AppError::Logging(e.to_string()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter(level));

    let result = if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()
    };

    result.map_err(|e| AppError::Logging(e.to_string()))?;

    // The writer thread must outlive every log call.
    std::mem::forget(guard);

    Ok(())
}
