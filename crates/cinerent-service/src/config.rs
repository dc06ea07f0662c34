//! Service configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use cinerent_core::MAX_RENTAL_DAYS;
use cinerent_db::DbConfig;

/// Rental service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// SQLite database file (`CINERENT_DB_PATH`)
    pub db_path: PathBuf,

    /// Pool size (`CINERENT_DB_MAX_CONNECTIONS`)
    pub db_max_connections: u32,

    /// Longest contracted rental in days (`CINERENT_MAX_RENTAL_DAYS`)
    pub max_rental_days: i64,

    /// Log filter override (`CINERENT_LOG_FILTER`), wins over `RUST_LOG`
    pub log_filter: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            db_path: PathBuf::from("cinerent.db"),
            db_max_connections: 5,
            max_rental_days: MAX_RENTAL_DAYS,
            log_filter: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();

        let config = ServiceConfig {
            db_path: get("CINERENT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),

            db_max_connections: get("CINERENT_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| defaults.db_max_connections.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CINERENT_DB_MAX_CONNECTIONS".to_string()))?,

            max_rental_days: get("CINERENT_MAX_RENTAL_DAYS")
                .unwrap_or_else(|| defaults.max_rental_days.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CINERENT_MAX_RENTAL_DAYS".to_string()))?,

            log_filter: get("CINERENT_LOG_FILTER").filter(|f| !f.trim().is_empty()),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "CINERENT_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if config.max_rental_days < 1 {
            return Err(ConfigError::InvalidValue(
                "CINERENT_MAX_RENTAL_DAYS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_source(source(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("cinerent.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.max_rental_days, 15);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_source(source(&[
            ("CINERENT_DB_PATH", "/tmp/rent.db"),
            ("CINERENT_DB_MAX_CONNECTIONS", "2"),
            ("CINERENT_MAX_RENTAL_DAYS", "30"),
            ("CINERENT_LOG_FILTER", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/rent.db"));
        assert_eq!(config.max_rental_days, 30);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.db_config().max_connections, 2);
    }

    #[test]
    fn test_invalid_values() {
        let err = ServiceConfig::from_source(source(&[("CINERENT_MAX_RENTAL_DAYS", "two weeks")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CINERENT_MAX_RENTAL_DAYS");

        assert!(ServiceConfig::from_source(source(&[("CINERENT_MAX_RENTAL_DAYS", "0")])).is_err());
        assert!(
            ServiceConfig::from_source(source(&[("CINERENT_DB_MAX_CONNECTIONS", "0")])).is_err()
        );
    }
}
