//! Logging setup
//!
//! Library code logs through the `log` facade. The binary installs a `fern`
//! dispatcher: a log file when logging is enabled, warnings on stderr otherwise.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};

/// Handle describing the installed logger
#[derive(Debug, Clone)]
pub struct Logger {
    enabled: bool,
    level: log::LevelFilter,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Build a logger from configuration without installing it
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let level = config.level_filter()?;
        let log_file = if config.enabled {
            Some(Self::get_log_file_path()?)
        } else {
            None
        };

        Ok(Self {
            enabled: config.enabled,
            level,
            log_file,
        })
    }

    /// Whether file logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Effective level of the file output
    pub fn level(&self) -> log::LevelFilter {
        if self.enabled {
            self.level
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Path of the log file, if file logging is enabled
    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Default location of the log file
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    }

    /// Build the fern dispatcher for this logger
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let base = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {:<5} {}: {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level());

        match &self.log_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
                }
                let file = fern::log_file(path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?;
                Ok(base.chain(file))
            }
            None => Ok(base.chain(std::io::stderr())),
        }
    }

    /// Install this logger as the global `log` backend
    pub fn install(&self) -> Result<()> {
        self.dispatch()?
            .apply()
            .context("A global logger is already installed")
    }
}

/// Build and install the logger described by `config`
pub fn init(config: &LoggingConfig) -> Result<Logger> {
    let logger = Logger::from_config(config)?;
    logger.install()?;
    Ok(logger)
}
