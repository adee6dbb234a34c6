//! Process configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path, log settings and reminder cadence once at startup.
//! - Reject malformed values before any subsystem starts.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - The sweep interval is never zero.

use crate::logging::{default_log_level, normalize_level};
use crate::scheduler::DEFAULT_SWEEP_INTERVAL;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_ENV: &str = "PRIORITIZE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PRIORITIZE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PRIORITIZE_LOG_DIR";
pub const SWEEP_SECS_ENV: &str = "PRIORITIZE_SWEEP_SECS";

const DEFAULT_DB_FILE_NAME: &str = "prioritize_me.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "prioritize_me_logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidLogDir(String),
    InvalidSweepInterval(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::InvalidLogDir(value) => {
                write!(f, "{LOG_DIR_ENV}: expected an absolute path, got `{value}`")
            }
            Self::InvalidSweepInterval(value) => write!(
                f,
                "{SWEEP_SECS_ENV}: expected a positive number of seconds, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
    pub sweep_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let temp_dir = std::env::temp_dir();
        Self {
            db_path: temp_dir.join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: temp_dir.join(DEFAULT_LOG_DIR_NAME),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }

        if let Some(dir) = read(LOG_DIR_ENV) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::InvalidLogDir(dir));
            }
            config.log_dir = path;
        }

        if let Some(secs) = read(SWEEP_SECS_ENV) {
            config.sweep_interval = match secs.parse::<u64>() {
                Ok(value) if value > 0 => Duration::from_secs(value),
                _ => return Err(ConfigError::InvalidSweepInterval(secs)),
            };
        }

        Ok(config)
    }
}
