//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! engine and its harness. It provides:
//! 1. **Defaults:** Baseline values matching the reference model (1 step/s, full dump every 100 steps).
//! 2. **Structures:** `general` settings for the engine and `display` settings for the harness.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! The engine itself only reads `general`; `display` is carried here so every
//! harness shares one file format.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Steps between periodic full-state prints.
    pub const PRINT_INTERVAL: u64 = 100;

    /// Steps per second when pacing for a human observer.
    pub const SPEED: f64 = 1.0;

    /// Whether the state table is printed after every step.
    pub const SHOW_EACH_STEP: bool = true;
}

/// Root configuration structure.
///
/// Every section and field is optional in JSON; missing values take their defaults.
///
/// # Example
///
/// ```
/// use hexcpu_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "step_limit": 500 },
///     "display": { "speed": 0.0 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.step_limit, Some(500));
/// assert_eq!(config.display.print_interval, 100);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings.
    pub general: GeneralConfig,
    /// Harness display and pacing settings.
    pub display: DisplayConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid JSON or has fields of the wrong type.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or [`ConfigError::Parse`] if it is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// Engine settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Raise the per-instruction tracing event from `trace` to `debug` level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Maximum number of instructions a run may execute; `None` runs until halt.
    #[serde(default)]
    pub step_limit: Option<u64>,
}

/// Harness display and pacing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Print the full state every N steps in addition to per-step output. Zero disables.
    #[serde(default = "DisplayConfig::default_print_interval")]
    pub print_interval: u64,

    /// Steps per second. Zero or negative disables pacing.
    #[serde(default = "DisplayConfig::default_speed")]
    pub speed: f64,

    /// Print the state table after every step.
    #[serde(default = "DisplayConfig::default_show_each_step")]
    pub show_each_step: bool,
}

impl DisplayConfig {
    fn default_print_interval() -> u64 {
        defaults::PRINT_INTERVAL
    }

    fn default_speed() -> f64 {
        defaults::SPEED
    }

    fn default_show_each_step() -> bool {
        defaults::SHOW_EACH_STEP
    }

    /// Delay between steps implied by `speed`, or `None` when unpaced.
    pub fn step_delay(&self) -> Option<Duration> {
        if self.speed > 0.0 && self.speed.is_finite() {
            Duration::try_from_secs_f64(self.speed.recip()).ok()
        } else {
            None
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            print_interval: defaults::PRINT_INTERVAL,
            speed: defaults::SPEED,
            show_each_step: defaults::SHOW_EACH_STEP,
        }
    }
}
