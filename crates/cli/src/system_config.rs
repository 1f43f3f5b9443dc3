//! Persisted user configuration
//!
//! Lives at `$TYPELOG_CONFIG` when set, otherwise
//! `<config dir>/typelog/config.toml`. A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use typelog_session::IdleTimeout;
use typelog_watcher::IgnoreConfig;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TYPELOG_CONFIG";

/// Idle timeouts accepted in the config file
pub const IDLE_TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=3_600_000;

/// Configuration values that fail validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} = {value} is out of range ({min}-{max})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("invalid extension {0:?}: expected a bare extension such as \"kt\"")]
    InvalidExtension(String),
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub recorder: RecorderConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// `[recorder]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Idle gap before the next edit is snapshotted
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Extension of the recorded file type
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: default_idle_timeout_ms(),
            extension: default_extension(),
        }
    }
}

fn default_idle_timeout_ms() -> u64 {
    IdleTimeout::DEFAULT_MS
}

fn default_extension() -> String {
    "kt".to_string()
}

impl SystemConfig {
    /// Check every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeout = self.recorder.idle_timeout_ms;
        if !IDLE_TIMEOUT_RANGE.contains(&timeout) {
            return Err(ConfigError::OutOfRange {
                key: "recorder.idle_timeout_ms",
                value: timeout,
                min: *IDLE_TIMEOUT_RANGE.start(),
                max: *IDLE_TIMEOUT_RANGE.end(),
            });
        }

        let ext = &self.recorder.extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) || ext.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidExtension(ext.clone()));
        }

        Ok(())
    }
}

/// Resolve the config file location
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("typelog").join("config.toml"))
}

/// Load configuration, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    let Some(path) = config_file_path() else {
        return Ok(SystemConfig::default());
    };
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Parse and validate config text
pub fn parse(text: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Write configuration to the config file
pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write the default configuration if no file exists yet
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save(&SystemConfig::default())?;
    }
    Ok(path)
}

/// Commented example configuration
pub fn example_config() -> &'static str {
    r#"# Typelog configuration

[recorder]
# Idle gap (ms) after which the next edit is snapshotted (1-3600000)
idle_timeout_ms = 1000
# Extension of the recorded file type, without the dot
extension = "kt"

[ignore]
# Skip files matched by the project's .gitignore
use_gitignore = true
# Extra gitignore-style patterns
additional_patterns = ["*.kts", "scratch/"]
"#
}
