//! Logging bootstrap for hosts embedding the contract.

use crate::config::ContractConfig;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("global subscriber already installed")]
    AlreadyInitialized,
}

/// Install a `fmt` subscriber honoring `RUST_LOG` first, then the configured
/// level. Fails with `AlreadyInitialized` if a subscriber is already set.
pub fn init_logging(config: &ContractConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::InvalidFilter {
            filter: config.log_level.clone(),
            reason: e.to_string(),
        })?;

    let builder = fmt().with_env_filter(env_filter).with_target(true);
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|_| TelemetryError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_already_initialized() {
        let config = ContractConfig::default();
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::AlreadyInitialized)
        ));
    }
}
