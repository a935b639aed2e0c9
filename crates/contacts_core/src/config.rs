//! Process-level core configuration.
//!
//! # Responsibility
//! - Collect the knobs a host process sets once at startup: log level, log
//!   directory and demo-data seeding.
//! - Read them from `CONTACTS_*` environment variables.
//!
//! # Invariants
//! - Unset variables fall back to defaults; malformed values are errors,
//!   never silently ignored.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "CONTACTS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CONTACTS_LOG_DIR";
pub const ENV_SEED_DEMO: &str = "CONTACTS_SEED_DEMO";

/// Startup configuration for a contact-core host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// Seed the two demo contacts right after construction.
    pub seed_demo_data: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            seed_demo_data: false,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to
    /// values. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: level,
            })?;
        }

        if let Some(dir) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_LOG_DIR,
                    value: dir,
                });
            }
            config.log_dir = Some(path);
        }

        if let Some(flag) = read(ENV_SEED_DEMO) {
            config.seed_demo_data = parse_flag(&flag).ok_or(ConfigError::InvalidValue {
                key: ENV_SEED_DEMO,
                value: flag,
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for {key}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_LOG_DIR, ENV_LOG_LEVEL, ENV_SEED_DEMO};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn reads_all_known_variables() {
        let log_dir = std::env::temp_dir().join("contacts-config-test");
        let log_dir_str = log_dir.to_str().unwrap();
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, " WARNING "),
            (ENV_LOG_DIR, log_dir_str),
            (ENV_SEED_DEMO, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_SEED_DEMO, "maybe")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_SEED_DEMO,
                value: "maybe".to_string(),
            }
        );

        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "relative/logs")])).unwrap_err();
        assert!(err.to_string().contains(ENV_LOG_DIR));

        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_LOG_LEVEL));
    }
}
