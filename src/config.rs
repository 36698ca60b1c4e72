//! Configuration management for medfind-drafts
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_DIR_NAME, AUTOSAVE_INTERVAL_MAX_SECS, AUTOSAVE_INTERVAL_MIN_SECS, CONFIG_FILE_NAME, CONFIG_GENERATED,
    DEFAULT_AUTOSAVE_INTERVAL_SECS, DEFAULT_MAX_DRAFTS, DEFAULT_NAMESPACE, DEFAULT_QUOTA_BYTES, LOCAL_CONFIG_FILE, MAX_DRAFTS_LIMIT,
};
use crate::drafts::DraftStoreOptions;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub drafts: DraftsConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Draft store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftsConfig {
    /// Storage key that scopes the draft collection
    pub namespace: String,
    /// Maximum number of drafts kept, oldest are evicted first
    pub max_drafts: usize,
    /// Periodically refresh the current draft
    pub autosave_enabled: bool,
    /// Autosave interval in seconds
    pub autosave_interval_secs: u64,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per namespace
    /// Defaults to the platform data directory when unset
    pub data_dir: Option<PathBuf>,
    /// Maximum size of a single stored value in bytes (0 = unlimited)
    pub quota_bytes: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable file logging
    pub enabled: bool,
    /// Log level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for DraftsConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            max_drafts: DEFAULT_MAX_DRAFTS,
            autosave_enabled: true,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl DraftsConfig {
    /// Build draft store options from this section
    pub fn store_options(&self) -> DraftStoreOptions {
        DraftStoreOptions {
            max_drafts: self.max_drafts,
            autosave_enabled: self.autosave_enabled,
            autosave_interval: Duration::from_secs(self.autosave_interval_secs),
        }
    }
}

impl StorageConfig {
    /// Quota as an option, `None` meaning unlimited
    pub fn quota(&self) -> Option<u64> {
        (self.quota_bytes > 0).then_some(self.quota_bytes)
    }

    /// Resolve the data directory, falling back to the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
                .map(|dir| dir.join(APP_DIR_NAME)),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.drafts.namespace.trim().is_empty() {
            anyhow::bail!("namespace cannot be empty");
        }

        if self.drafts.max_drafts == 0 || self.drafts.max_drafts > MAX_DRAFTS_LIMIT {
            anyhow::bail!(
                "max_drafts must be between 1 and {}, got {}",
                MAX_DRAFTS_LIMIT,
                self.drafts.max_drafts
            );
        }

        let interval = self.drafts.autosave_interval_secs;
        if !(AUTOSAVE_INTERVAL_MIN_SECS..=AUTOSAVE_INTERVAL_MAX_SECS).contains(&interval) {
            anyhow::bail!(
                "autosave_interval_secs must be between {} and {} (24 hours), got {}",
                AUTOSAVE_INTERVAL_MIN_SECS,
                AUTOSAVE_INTERVAL_MAX_SECS,
                interval
            );
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# medfind-drafts Configuration File\n# Generated on {}\n\n",
            datetime::format_export_date()
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }
}
