//! Configuration structures and loading.

use cms_architect_error::{ArchitectResult, ConfigError};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../cms_architect.toml");

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "CMS_ARCHITECT";

/// Provider connection settings.
///
/// ```toml
/// [provider]
/// name = "gemini"
/// model = "gemini-2.5-flash"
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// api_key_vars = ["GEMINI_API_KEY", "API_KEY"]
/// request_timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider name (only "gemini" is supported)
    pub name: String,
    /// Default model identifier
    pub model: String,
    /// REST API base URL
    pub base_url: String,
    /// Environment variables consulted for the API key, in order
    #[serde(default)]
    pub api_key_vars: Vec<String>,
    /// Per-call timeout in seconds
    pub request_timeout_secs: u64,
    /// Sampling temperature override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum output tokens override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl ProviderConfig {
    /// First non-empty API key found in the configured environment variables.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    /// Per-call timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Conversation session settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Most recent messages forwarded with each chat turn (0 = unbounded)
    #[serde(default)]
    pub max_history_messages: usize,
}

impl SessionConfig {
    /// History cap, `None` when unbounded.
    pub fn history_cap(&self) -> Option<usize> {
        match self.max_history_messages {
            0 => None,
            max => Some(max),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Emit JSON-formatted log lines
    #[serde(default)]
    pub json: bool,
    /// Log file used while the terminal UI owns the screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Configured log file, or `<cache dir>/cms_architect/cms_architect.log`.
    pub fn log_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("cms_architect")
                .join("cms_architect.log")
        })
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

/// Complete application configuration.
///
/// # Example
///
/// ```no_run
/// use cms_architect_config::ArchitectConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArchitectConfig::load()?;
/// println!("Model: {}", config.provider.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArchitectConfig {
    /// Provider connection settings
    pub provider: ProviderConfig,
    /// Session settings
    pub session: SessionConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Terminal UI settings
    pub tui: TuiConfig,
}

impl ArchitectConfig {
    /// Bundled defaults only, ignoring user files and the environment.
    pub fn bundled() -> ArchitectResult<Self> {
        Self::build(Self::defaults())
    }

    /// Load configuration with precedence: environment > cwd > home > bundled defaults.
    #[instrument]
    pub fn load() -> ArchitectResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, layering an explicit file above the user files.
    ///
    /// The explicit file is required; user files are optional and skipped if missing.
    #[instrument]
    pub fn load_with(explicit: Option<&Path>) -> ArchitectResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > cwd > home > bundled");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/cms_architect/cms_architect.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("cms_architect").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::build(builder)
    }

    /// Load bundled defaults overlaid with a single file.
    pub fn from_file(path: impl AsRef<Path>) -> ArchitectResult<Self> {
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::build(builder)
    }

    /// Check values that deserialize fine but cannot work.
    pub fn validate(&self) -> ArchitectResult<()> {
        if self.provider.name != "gemini" {
            return Err(ConfigError::new(format!(
                "Unsupported provider '{}' (only 'gemini' is available)",
                self.provider.name
            ))
            .into());
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::new("provider.model must not be empty").into());
        }
        if self.provider.request_timeout_secs == 0 {
            return Err(ConfigError::new("provider.request_timeout_secs must be positive").into());
        }
        if self.tui.tick_rate_ms == 0 {
            return Err(ConfigError::new("tui.tick_rate_ms must be positive").into());
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> ArchitectResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}
