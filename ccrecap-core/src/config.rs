//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/ccrecap/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/ccrecap/` (~/.config/ccrecap/)
//! - State/Logs: `$XDG_STATE_HOME/ccrecap/` (~/.local/state/ccrecap/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Override path for the Claude Code data directory (~/.claude)
    pub data_dir: Option<PathBuf>,

    /// Report generation configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report generation configuration
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Number of sample prompts to include in the report
    #[serde(default = "default_sample_prompts")]
    pub sample_prompts: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sample_prompts: default_sample_prompts(),
        }
    }
}

fn default_sample_prompts() -> usize {
    20
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/ccrecap/config.toml` (~/.config/ccrecap/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("ccrecap").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/ccrecap/` (~/.local/state/ccrecap/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("ccrecap")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/ccrecap/ccrecap.log` (~/.local/state/ccrecap/ccrecap.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("ccrecap.log")
    }

    /// Returns the Claude Code data directory: the configured override,
    /// or `~/.claude`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| home_dir().join(".claude"))
    }
}
