//! Logging setup for the `cms-architect` binary.
//!
//! The terminal UI owns the screen, so in TUI mode logs go to a file; the
//! one-shot commands log to stderr and keep stdout for their output.

use cms_architect_config::LoggingConfig;
use cms_architect_error::{ArchitectResult, ConfigError};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Append to a file, creating parent directories as needed
    File(PathBuf),
}

/// Configuration for logging.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log level filter (e.g., "info", "debug"); `RUST_LOG` takes precedence
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
    /// Destination of log events
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Create a new configuration writing to `target` at `log_level`.
    pub fn new(log_level: impl Into<String>, target: LogTarget) -> Self {
        Self {
            log_level: log_level.into(),
            json_logs: false,
            target,
        }
    }

    /// Configuration from the `[logging]` section.
    pub fn from_logging(config: &LoggingConfig, target: LogTarget) -> Self {
        Self::new(config.level.clone(), target).with_json_logs(config.json)
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Filter from `RUST_LOG`, falling back to the configured level.
    pub fn env_filter(&self) -> ArchitectResult<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .map_err(|e| {
                ConfigError::new(format!("Invalid log level '{}': {}", self.log_level, e)).into()
            })
    }
}

fn open_log_file(path: &Path) -> ArchitectResult<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::new(format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            ConfigError::new(format!("Failed to open log file {}: {}", path.display(), e))
        })?;
    Ok(file)
}

/// Initialize the global tracing subscriber.
///
/// This sets up:
/// - An `EnvFilter` from `RUST_LOG` or the configured level
/// - A text or JSON formatter writing to stderr or a log file
pub fn init_observability_with_config(config: ObservabilityConfig) -> ArchitectResult<()> {
    let env_filter = config.env_filter()?;

    let fmt_layer = match &config.target {
        LogTarget::Stderr => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true);
            if config.json_logs {
                layer.json().boxed()
            } else {
                layer.boxed()
            }
        }
        LogTarget::File(path) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(open_log_file(path)?))
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            if config.json_logs {
                layer.json().boxed()
            } else {
                layer.boxed()
            }
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
