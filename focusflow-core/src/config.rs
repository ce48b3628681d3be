//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/focusflow/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/focusflow/` (~/.config/focusflow/)
//! - Data: `$XDG_DATA_HOME/focusflow/` (~/.local/share/focusflow/)
//! - State/Logs: `$XDG_STATE_HOME/focusflow/` (~/.local/state/focusflow/)
//!
//! The loaded [`Config`] is passed explicitly to whatever needs it; nothing in
//! this crate keeps settings in process-wide state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
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

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// Timer durations
    #[serde(default)]
    pub timers: TimerConfig,

    /// Website blocker settings
    #[serde(default)]
    pub blocker: BlockerConfig,

    /// Session history location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timer durations in minutes
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TimerConfig {
    /// Focus session length
    #[serde(default = "default_work_minutes")]
    pub work: u32,

    /// Short break length
    #[serde(default = "default_short_break_minutes")]
    pub short_break: u32,

    /// Long break length
    #[serde(default = "default_long_break_minutes")]
    pub long_break: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work: default_work_minutes(),
            short_break: default_short_break_minutes(),
            long_break: default_long_break_minutes(),
        }
    }
}

impl TimerConfig {
    /// Replace zero durations with the defaults.
    ///
    /// A zero-minute timer is never what the user meant; it is how an empty or
    /// unparsable field in the settings ends up on disk.
    pub fn normalized(&self) -> Self {
        let or_default = |value: u32, default: u32| if value == 0 { default } else { value };
        Self {
            work: or_default(self.work, default_work_minutes()),
            short_break: or_default(self.short_break, default_short_break_minutes()),
            long_break: or_default(self.long_break, default_long_break_minutes()),
        }
    }
}

fn default_work_minutes() -> u32 {
    25
}

fn default_short_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

/// Hosts-file website blocker settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BlockerConfig {
    /// Enable/disable blocking during focus sessions
    #[serde(default = "default_blocker_enabled")]
    pub enabled: bool,

    /// Path to the OS hosts file
    #[serde(default = "default_hosts_path")]
    pub hosts_path: PathBuf,

    /// Address blocked sites are redirected to
    #[serde(default = "default_redirect_ip")]
    pub redirect_ip: String,

    /// Hostnames to block
    #[serde(default = "default_blocked_sites")]
    pub sites: Vec<String>,
}

impl Default for BlockerConfig {
    fn default() -> Self {
        Self {
            enabled: default_blocker_enabled(),
            hosts_path: default_hosts_path(),
            redirect_ip: default_redirect_ip(),
            sites: default_blocked_sites(),
        }
    }
}

impl BlockerConfig {
    /// Parse a block list edited as plain text, one site per line.
    ///
    /// Blank lines and `#` comment lines are dropped.
    pub fn parse_sites(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}

fn default_blocker_enabled() -> bool {
    true
}

fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:/Windows/System32/drivers/etc/hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

fn default_redirect_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_blocked_sites() -> Vec<String> {
    [
        "www.youtube.com",
        "youtube.com",
        "www.facebook.com",
        "facebook.com",
        "www.twitter.com",
        "twitter.com",
        "www.instagram.com",
        "instagram.com",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Session history storage settings
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Override path for the session history file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
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

    /// Write configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        tracing::info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Render as the TOML that [`Config::load_from`] reads back.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))
    }

    /// Returns the session history file this config points at.
    pub fn history_path(&self) -> PathBuf {
        self.storage
            .history_path
            .clone()
            .unwrap_or_else(Self::default_history_path)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/focusflow/config.toml` (~/.config/focusflow/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("focusflow").join("config.toml")
    }

    /// Returns the data directory path (for the session history)
    ///
    /// `$XDG_DATA_HOME/focusflow/` (~/.local/share/focusflow/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("focusflow")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/focusflow/` (~/.local/state/focusflow/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("focusflow")
    }

    /// Returns the default session history file path
    ///
    /// `$XDG_DATA_HOME/focusflow/analytics.json`
    pub fn default_history_path() -> PathBuf {
        Self::data_dir().join("analytics.json")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/focusflow/focusflow.log` (~/.local/state/focusflow/focusflow.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("focusflow.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for the CLI, which wants explicit, stable path behavior
    /// before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}
