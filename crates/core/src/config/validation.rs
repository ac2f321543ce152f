//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

const MAX_RETENTION_HOURS: u64 = 24 * 365;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_cache_size` is 0 or exceeds 10000
    /// - `history_retention_hours` is 0 or exceeds one year (8760)
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_input_chars` or `max_tokens` is 0
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cache_size == 0 {
            return Err(ConfigError::Invalid { field: "max_cache_size".into(), reason: "must be greater than 0".into() });
        }
        if self.max_cache_size > 10_000 {
            return Err(ConfigError::Invalid {
                field: "max_cache_size".into(),
                reason: "must not exceed 10000".into(),
            });
        }

        if self.history_retention_hours == 0 {
            return Err(ConfigError::Invalid {
                field: "history_retention_hours".into(),
                reason: "must be at least 1 hour".into(),
            });
        }
        if self.history_retention_hours > MAX_RETENTION_HOURS {
            return Err(ConfigError::Invalid {
                field: "history_retention_hours".into(),
                reason: format!("must not exceed {MAX_RETENTION_HOURS} hours"),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_input_chars == 0 {
            return Err(ConfigError::Invalid { field: "max_input_chars".into(), reason: "must be greater than 0".into() });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid { field: "max_tokens".into(), reason: "must be greater than 0".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.require_api_key(self.provider).is_err() {
            tracing::warn!(
                provider = %self.provider,
                "No API key configured for the default provider; summarize calls will fail until one is set"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_cache_size_zero() {
        let config = AppConfig { max_cache_size: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_cache_size"));
    }

    #[test]
    fn test_validate_cache_size_exceeds_limit() {
        let config = AppConfig { max_cache_size: 10_001, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_cache_size"));
    }

    #[test]
    fn test_validate_retention_zero() {
        let config = AppConfig { history_retention_hours: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "history_retention_hours"));
    }

    #[test]
    fn test_validate_retention_exceeds_limit() {
        let config = AppConfig { history_retention_hours: u64::MAX, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "history_retention_hours"));

        let config = AppConfig { history_retention_hours: MAX_RETENTION_HOURS, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));

        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig {
            max_cache_size: 1,
            history_retention_hours: 1,
            timeout_ms: 100,
            max_input_chars: 1,
            max_tokens: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
