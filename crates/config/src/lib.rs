//! Configuration loading, validation, and management for Movodoro.
//!
//! Loads configuration from `~/.movodoro/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory (`~/.movodoro`).
pub const ENV_HOME: &str = "MOVODORO_HOME";
/// Environment variable overriding the catalog directory.
pub const ENV_MOVOS_DIR: &str = "MOVODORO_MOVOS_DIR";
/// Environment variable naming the active subset.
pub const ENV_ACTIVE_SUBSET: &str = "MOVODORO_ACTIVE_SUBSET";
/// Environment variable overriding the daily intensity budget.
pub const ENV_MAX_DAILY_INTENSITY: &str = "MOVODORO_MAX_DAILY_INTENSITY";

/// The root configuration structure.
///
/// Maps directly to `~/.movodoro/config.toml`. Path fields left unset
/// resolve against the base directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory of category YAML files and `subsets.yaml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movos_dir: Option<PathBuf>,

    /// Directory of per-day ledger files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_dir: Option<PathBuf>,

    /// File holding the code of the item currently on offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_path: Option<PathBuf>,

    /// Daily cumulative intensity that triggers recovery mode
    #[serde(default = "default_max_daily_intensity")]
    pub max_daily_intensity: u32,

    /// Subset applied when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_subset: Option<String>,

    /// Base directory; not serialized
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn default_max_daily_intensity() -> u32 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            movos_dir: None,
            logs_dir: None,
            current_path: None,
            max_daily_intensity: default_max_daily_intensity(),
            active_subset: None,
            base_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (`~/.movodoro/config.toml`).
    ///
    /// Environment variables take priority over the file:
    /// - `MOVODORO_HOME`: base directory
    /// - `MOVODORO_MOVOS_DIR`: catalog directory
    /// - `MOVODORO_ACTIVE_SUBSET`: active subset
    /// - `MOVODORO_MAX_DAILY_INTENSITY`: daily intensity budget
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let base = env(ENV_HOME)
            .map(PathBuf::from)
            .unwrap_or_else(|| dirs_home().join(".movodoro"));
        let mut config = Self::load_from(&base.join("config.toml"))?;
        config.base_dir = Some(base);
        config.apply_env(env)?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.base_dir = path.parent().map(Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(dir) = lookup(ENV_MOVOS_DIR).filter(|v| !v.is_empty()) {
            self.movos_dir = Some(PathBuf::from(dir));
        }

        if let Some(subset) = lookup(ENV_ACTIVE_SUBSET).filter(|v| !v.is_empty()) {
            self.active_subset = Some(subset);
        }

        if let Some(raw) = lookup(ENV_MAX_DAILY_INTENSITY).filter(|v| !v.is_empty()) {
            self.max_daily_intensity = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "{ENV_MAX_DAILY_INTENSITY} must be a positive integer, got '{raw}'"
                ))
            })?;
        }

        self.validate()
    }

    /// Use `dir` as the base directory for unset paths.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Base directory (`~/.movodoro` unless overridden).
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .unwrap_or_else(|| dirs_home().join(".movodoro"))
    }

    /// Resolved catalog directory.
    pub fn movos_dir(&self) -> PathBuf {
        self.movos_dir
            .clone()
            .unwrap_or_else(|| self.base_dir().join("movos"))
    }

    /// Resolved ledger directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.logs_dir
            .clone()
            .unwrap_or_else(|| self.base_dir().join("logs"))
    }

    /// Resolved path of the "current item" file.
    pub fn current_path(&self) -> PathBuf {
        self.current_path
            .clone()
            .unwrap_or_else(|| self.base_dir().join("current"))
    }

    /// Path of the config file this configuration is read from.
    pub fn config_path(&self) -> PathBuf {
        self.base_dir().join("config.toml")
    }

    /// Active subset, if any.
    pub fn active_subset(&self) -> Option<&str> {
        self.active_subset.as_deref().filter(|s| !s.is_empty())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_daily_intensity == 0 {
            return Err(ConfigError::ValidationError(
                "max_daily_intensity must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
