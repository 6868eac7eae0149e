//! Application configuration: TOML file with every field defaulted.
//!
//! ```toml
//! dictionary = "sequences.json"
//!
//! [gesture]
//! min_distance = 60.0
//! cell_width_px = 10.0
//! cell_height_px = 20.0
//!
//! [timing]
//! match_dwell_ms = 1600
//! failure_dwell_ms = 200
//!
//! [audio]
//! bell = true
//!
//! [log]
//! enabled = true
//! # file = "/tmp/stratagem.log"
//! level = "info"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::DEFAULT_MIN_DISTANCE;
use crate::machine::InteractionConfig;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Stratagem dictionary (JSON).
    pub dictionary: PathBuf,
    pub gesture: GestureConfig,
    pub timing: TimingConfig,
    pub audio: AudioConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Noise threshold in pixels. The original tool shipped with 100 and 60.
    pub min_distance: f64,
    /// Pixel size of one terminal cell, used to turn cell positions into pixels.
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub match_dwell_ms: u64,
    pub failure_dwell_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Ring the terminal bell on success and failure.
    pub bell: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub enabled: bool,
    /// Log file. Unset means the front-end picks a per-user location.
    pub file: Option<PathBuf>,
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("sequences.json"),
            gesture: GestureConfig::default(),
            timing: TimingConfig::default(),
            audio: AudioConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            cell_width_px: 10.0,
            cell_height_px: 20.0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            match_dwell_ms: 1600,
            failure_dwell_ms: 200,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { bell: true }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    /// A file that exists but is unreadable or invalid is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        if !(g.min_distance.is_finite() && g.min_distance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gesture.min_distance must be a non-negative number, got {}",
                g.min_distance
            )));
        }
        let cells = [
            ("cell_width_px", g.cell_width_px),
            ("cell_height_px", g.cell_height_px),
        ];
        for (name, value) in cells {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "gesture.{name} must be positive, got {value}"
                )));
            }
        }
        if self.timing.match_dwell_ms == 0 || self.timing.failure_dwell_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing dwell durations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// State machine tunables.
    pub fn interaction(&self) -> InteractionConfig {
        InteractionConfig {
            min_swipe_distance: self.gesture.min_distance,
            match_dwell: Duration::from_millis(self.timing.match_dwell_ms),
            failure_dwell: Duration::from_millis(self.timing.failure_dwell_ms),
        }
    }
}
