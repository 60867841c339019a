//! Application configuration
//!
//! All tunables (flow delays, swipe thresholds, capture constraints) live in
//! [`AppConfig`]. Every field has a default, so an empty JSON object is a
//! valid config file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable pointing at a JSON config file
pub const CONFIG_PATH_ENV: &str = "STYLE_AI_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// Field path
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Delays for the color analysis flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisTimings {
    /// Time spent in positioning before analysis starts (ms)
    pub positioning_ms: u64,
    /// Time spent analyzing before the result is shown (ms)
    pub analyzing_ms: u64,
}

impl Default for AnalysisTimings {
    fn default() -> Self {
        Self {
            positioning_ms: 3000,
            analyzing_ms: 4000,
        }
    }
}

impl AnalysisTimings {
    /// Positioning delay
    pub fn positioning(&self) -> Duration {
        Duration::from_millis(self.positioning_ms)
    }

    /// Analysis delay
    pub fn analyzing(&self) -> Duration {
        Duration::from_millis(self.analyzing_ms)
    }
}

/// Swipe gesture tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwipeConfig {
    /// Absolute offset (px) a drag must exceed to commit
    pub commit_threshold: f32,
    /// Rotation applied per pixel of offset (degrees)
    pub rotation_per_px: f32,
    /// Opacity lost per pixel of offset
    pub fade_per_px: f32,
    /// Absolute offset (px) at which the like/reject indicator appears
    pub indicator_threshold: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: 100.0,
            rotation_per_px: 0.1,
            fade_per_px: 0.002,
            indicator_threshold: 50.0,
        }
    }
}

/// Pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Create a resolution
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Camera and microphone request settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConfig {
    /// Preferred video resolution
    pub ideal: Resolution,
    /// Smallest acceptable video resolution
    pub minimum: Resolution,
    /// Delay between attempts to start video playback (ms)
    pub playback_retry_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            ideal: Resolution::new(1280, 720),
            minimum: Resolution::new(640, 480),
            playback_retry_ms: 100,
        }
    }
}

impl CaptureConfig {
    /// Playback retry interval
    pub fn playback_retry(&self) -> Duration {
        Duration::from_millis(self.playback_retry_ms)
    }
}

/// Try-on screen settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TryOnConfig {
    /// Delay between confirming a purchase and returning to discover (ms)
    pub redirect_ms: u64,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self { redirect_ms: 2000 }
    }
}

impl TryOnConfig {
    /// Redirect delay
    pub fn redirect(&self) -> Duration {
        Duration::from_millis(self.redirect_ms)
    }
}

/// Share payload settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShareConfig {
    /// Origin prepended to route paths when building share URLs
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Color analysis delays
    pub analysis: AnalysisTimings,
    /// Swipe tuning
    pub swipe: SwipeConfig,
    /// Capture settings
    pub capture: CaptureConfig,
    /// Try-on settings
    pub try_on: TryOnConfig,
    /// Share settings
    pub share: ShareConfig,
}

impl AppConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from the file named by `STYLE_AI_CONFIG`, or fall back to defaults
    pub async fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(path).await,
            _ => Ok(Self::default()),
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.analysis.positioning_ms == 0 {
            return Err(invalid("analysis.positioningMs", "must be greater than zero"));
        }
        if self.analysis.analyzing_ms == 0 {
            return Err(invalid("analysis.analyzingMs", "must be greater than zero"));
        }
        if !(self.swipe.commit_threshold > 0.0) {
            return Err(invalid("swipe.commitThreshold", "must be positive"));
        }
        if self.swipe.fade_per_px < 0.0 {
            return Err(invalid("swipe.fadePerPx", "must not be negative"));
        }
        let (ideal, min) = (self.capture.ideal, self.capture.minimum);
        if ideal.width < min.width || ideal.height < min.height {
            return Err(invalid("capture.ideal", "must not be smaller than capture.minimum"));
        }
        if self.capture.playback_retry_ms == 0 {
            return Err(invalid("capture.playbackRetryMs", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
