//! Contract configuration from environment variables.

use std::env;

/// Configuration of the commodity transfer contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Transient key carrying the private attribute blob.
    pub properties_key: String,

    /// Transient key carrying the transfer commitment blob.
    pub transfer_key_key: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            properties_key: "commodity_properties".to_string(),
            transfer_key_key: "commodity_transferKey".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ContractConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CC_PROPERTIES_KEY`: transient key of the attribute blob (default: commodity_properties)
    /// - `CC_TRANSFER_KEY`: transient key of the commitment blob (default: commodity_transferKey)
    /// - `CC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CC_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            properties_key: lookup("CC_PROPERTIES_KEY").unwrap_or(defaults.properties_key),
            transfer_key_key: lookup("CC_TRANSFER_KEY").unwrap_or(defaults.transfer_key_key),
            log_level: lookup("CC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            json_logs: lookup("CC_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.json_logs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_env() {
        let config = ContractConfig::from_lookup(|_| None);
        assert_eq!(config, ContractConfig::default());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CC_PROPERTIES_KEY", "asset_properties"),
            ("RUST_LOG", "debug"),
            ("CC_JSON_LOGS", "TRUE"),
        ]
        .into_iter()
        .collect();
        let config = ContractConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.properties_key, "asset_properties");
        assert_eq!(config.transfer_key_key, "commodity_transferKey");
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }
}
