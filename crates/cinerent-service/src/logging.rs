//! # Logging
//!
//! Installs the global tracing subscriber.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=cinerent_core=trace` - Trace the calculators only
//! - `CINERENT_LOG_FILTER` - Same syntax, overrides `RUST_LOG`
//! - Default: `info,cinerent=debug,sqlx=warn`

use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;

pub const DEFAULT_FILTER: &str = "info,cinerent=debug,sqlx=warn";

/// Builds the filter: config override, then `RUST_LOG`, then the default.
pub fn build_filter(config: &ServiceConfig) -> EnvFilter {
    config
        .log_filter
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    config: &ServiceConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(true)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let config = ServiceConfig {
            log_filter: Some("warn".to_string()),
            ..ServiceConfig::default()
        };
        assert_eq!(build_filter(&config).to_string(), "warn");
    }

    #[test]
    fn test_second_init_fails() {
        let config = ServiceConfig::default();
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
