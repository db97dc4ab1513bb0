//! Structured logging for suffixseek
//!
//! Installs a `tracing` subscriber writing plain or JSON events to stderr or
//! to a log file, so stdout stays reserved for search results.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::from_level(level.into())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level (RUST_LOG directives still apply on top)
    pub level: LogLevel,
    /// Emit JSON events instead of plain text
    pub json_format: bool,
    /// Log file directory (None for stderr)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    /// Log file name inside `log_dir`
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            json_format: false,
            log_dir: None,
            log_file: "suffixseek.log".to_string(),
        }
    }
}

/// Installed subscriber; dropping it flushes buffered events
pub struct LoggingSystem {
    config: LoggingConfig,
    _guard: WorkerGuard,
}

impl LoggingSystem {
    /// Initialize the global subscriber with configuration
    pub fn init(config: LoggingConfig) -> Result<Self> {
        let (writer, guard) = match &config.log_dir {
            Some(log_dir) => {
                fs::create_dir_all(log_dir)?;
                let appender = tracing_appender::rolling::never(log_dir, &config.log_file);
                tracing_appender::non_blocking(appender)
            }
            None => tracing_appender::non_blocking(std::io::stderr()),
        };

        let format_layer = if config.json_format {
            tracing_fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .boxed()
        } else {
            tracing_fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(config.log_dir.is_none())
                .boxed()
        };

        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from(config.level).into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(format_layer.with_filter(env_filter))
            .try_init()
            .map_err(|e| SearchError::config(format!("Failed to initialize logging: {}", e)))?;

        info!(config = ?config, "suffixseek logging initialized");

        Ok(Self {
            config,
            _guard: guard,
        })
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }
}

/// Runs `f` and logs how long it took under `operation`
pub fn timed<T, F>(operation: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    info!(operation, elapsed = ?start.elapsed(), "Operation completed");
    result
}
