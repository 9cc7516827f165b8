//! Structured logging setup.
//!
//! Console and/or daily-rotated file output, optional JSON formatting,
//! level controlled by config with an `RUST_LOG` override.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub output: LogOutput,
    pub json: bool,
    /// Log directory; required when `output` writes to files.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Console,
            json: false,
            directory: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("log directory is required for file output")]
    MissingDirectory,

    #[error("failed to create log directory: {0}")]
    CreateDirectory(#[from] std::io::Error),

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Keeps the non-blocking writer threads alive; hold it for the process
/// lifetime.
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initialize the global subscriber from config.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers = Vec::new();
    let mut guards = Vec::new();

    if matches!(config.output, LogOutput::Console | LogOutput::Both) {
        let layer = tracing_subscriber::fmt::layer().with_target(true);
        layers.push(if config.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        });
    }

    if matches!(config.output, LogOutput::File | LogOutput::Both) {
        let directory = config
            .directory
            .as_ref()
            .ok_or(LoggingError::MissingDirectory)?;
        std::fs::create_dir_all(directory)?;

        let appender = RollingFileAppender::new(Rotation::DAILY, directory, "filescout.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        layers.push(if config.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        });
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))?;

    Ok(LoggingGuard { _guards: guards })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_output_requires_a_directory() {
        let config = LoggingConfig {
            output: LogOutput::File,
            directory: None,
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init(&config),
            Err(LoggingError::MissingDirectory)
        ));
    }

    #[test]
    fn defaults_log_to_console_at_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.output, LogOutput::Console);
        assert!(!config.json);
    }
}
