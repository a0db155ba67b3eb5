//! Harness configuration
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `config/default.toml`
//! 3. `config/user.toml` (local overrides, not version controlled)
//! 4. Environment variables (`CONWAY_WIDTH`, `CONWAY_TICK_INTERVAL_MS`, ...)
//! 5. Command-line flags, applied with [`AppConfig::apply_cli`]

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Clock interval used by `run` without an argument
    pub tick_interval_ms: u64,
    /// Default log filter (error, warn, info, debug, trace); `RUST_LOG` wins
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: conway::DEFAULT_WIDTH,
            height: conway::DEFAULT_HEIGHT,
            tick_interval_ms: conway::DEFAULT_TICK_INTERVAL.as_millis() as u64,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CONWAY_TICK_INTERVAL_MS=50 -> tick_interval_ms = 50
        figment = figment.merge(Env::prefixed("CONWAY_"));

        Ok(figment.extract()?)
    }

    /// Command-line flags override every file and environment source.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(ms) = cli.interval_ms {
            self.tick_interval_ms = ms;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 100);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_config_serialization() {
        let toml = toml::to_string(&AppConfig::default()).unwrap();
        assert!(toml.contains("tick_interval_ms = 200"));
        assert!(toml.contains("width = 100"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["conway_coro", "--width", "12", "--interval-ms", "50"]);
        let mut config = AppConfig::default();
        config.apply_cli(&cli);
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 100);
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.log_level, "info");
    }
}
