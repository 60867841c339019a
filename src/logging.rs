//! Logging setup for the StyleAI binary
//!
//! Supports text, JSON and pretty-printed output. The format and level come
//! from `STYLE_AI_LOG_FORMAT` and `STYLE_AI_LOG_LEVEL`; `RUST_LOG` takes
//! precedence over the level when set.
//!
//! ```no_run
//! use style_ai::logging::{LogFormat, LoggingConfig};
//!
//! LoggingConfig::new(LogFormat::Json, "debug".to_string()).init().ok();
//! ```

use std::error::Error;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "STYLE_AI_LOG_FORMAT";
/// Environment variable selecting the minimum level
pub const LOG_LEVEL_ENV: &str = "STYLE_AI_LOG_LEVEL";

/// Error returned when a global subscriber is already installed
pub type InitError = Box<dyn Error + Send + Sync + 'static>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain text without colors
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line colored output for development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum level or filter directive ("info", "app_state=debug")
    pub level: String,
}

impl LoggingConfig {
    /// Create a configuration
    pub fn new(format: LogFormat, level: String) -> Self {
        Self { format, level }
    }

    /// Read the configuration from the environment
    ///
    /// Unknown formats fall back to text and a missing level to `info`.
    pub fn from_env() -> Self {
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
        Self::new(format, level)
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber, writing to stderr
    ///
    /// Fails if a subscriber is already installed.
    pub fn init(&self) -> Result<(), InitError> {
        let filter = self.filter();

        match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .try_init(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(LogFormat::Text, "info".to_string())
    }
}

/// Initialize logging from the environment
pub fn init_default() -> Result<(), InitError> {
    LoggingConfig::from_env().init()
}
