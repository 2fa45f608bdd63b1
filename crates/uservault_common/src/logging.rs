//! Logging utilities for the uservault application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the workspace. Console output always goes through a `fmt` layer with
//! target and file/line information; when a log file is configured, a daily
//! rolling file appender is added alongside it.

use std::path::Path;

use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uservault_config::LoggingConfig;

/// Default directory for log files when only a file name is configured.
const DEFAULT_LOG_DIR: &str = "logs";

/// Initialize the tracing subscriber from the logging configuration.
///
/// The filter is taken from `RUST_LOG` when set, otherwise from
/// `config.level`, otherwise `info`. When `config.file` is set, a daily
/// rolling appender is created under `config.directory` (or `logs/`).
///
/// Returns the worker guard for the file appender, if one was created. The
/// caller must keep the guard alive for the lifetime of the process or
/// buffered log lines are lost on exit.
///
/// Initializing more than once is a no-op, never a panic.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = env_filter(config.level.as_deref());

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let (file_layer, guard) = match &config.file {
        Some(file) => {
            let directory = config.directory.as_deref().unwrap_or(DEFAULT_LOG_DIR);
            let appender = tracing_appender::rolling::daily(Path::new(directory), file);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized");
    }
    guard
}

/// Initialize the tracing subscriber with a fixed minimum level.
///
/// Convenience for tests and tools that have no [`LoggingConfig`] at hand.
pub fn init_with_level(level: Level) {
    let filter = env_filter(Some(&level.to_string()));
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();
    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

fn env_filter(configured: Option<&str>) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(configured.unwrap_or("info")),
    }
}
