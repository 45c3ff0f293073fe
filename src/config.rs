//! Runtime configuration loaded from the environment.
//!
//! Every setting has a default, so an empty environment yields a working configuration.
//! A `.env` file is read by `main` (via `dotenvy`) before [`AppConfig::from_env`] runs.
//!
//! | Variable | Default |
//! |---|---|
//! | `MOVIES_API_HOST` | `0.0.0.0` |
//! | `MOVIES_API_PORT` | `8080` |
//! | `STORE_CHANNEL_CAPACITY` | `32` |
//! | `RETRY_MAX_RETRIES` | `3` |
//! | `RETRY_BASE_DELAY_MS` | `1000` |
//! | `BREAKER_FAILURE_THRESHOLD` | `2` |
//! | `BREAKER_COOLDOWN_SECS` | `60` |

use resilience::{CircuitBreakerConfig, RetryPolicy};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Request buffer of each store's channel
    pub store_channel_capacity: usize,
    pub retry: RetryPolicy,
    pub breaker: CircuitBreakerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store_channel_capacity: 32,
            retry: RetryPolicy::default(),
            breaker: CircuitBreakerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("MOVIES_API_HOST").unwrap_or(defaults.host);
        let port = parse_or(&lookup, "MOVIES_API_PORT", defaults.port)?;
        let store_channel_capacity = parse_or(
            &lookup,
            "STORE_CHANNEL_CAPACITY",
            defaults.store_channel_capacity,
        )
        .and_then(|v| positive(v, "STORE_CHANNEL_CAPACITY"))?;
        let max_retries = parse_or(&lookup, "RETRY_MAX_RETRIES", defaults.retry.max_retries)?;
        let base_delay_ms = parse_or(
            &lookup,
            "RETRY_BASE_DELAY_MS",
            defaults.retry.base_delay.as_millis() as u64,
        )?;
        let failure_threshold = parse_or(
            &lookup,
            "BREAKER_FAILURE_THRESHOLD",
            defaults.breaker.failure_threshold,
        )
        .and_then(|v| positive(v, "BREAKER_FAILURE_THRESHOLD"))?;
        let cooldown_secs = parse_or(
            &lookup,
            "BREAKER_COOLDOWN_SECS",
            defaults.breaker.cooldown.as_secs(),
        )?;

        Ok(Self {
            host,
            port,
            store_channel_capacity,
            retry: RetryPolicy::new(max_retries, Duration::from_millis(base_delay_ms)),
            breaker: CircuitBreakerConfig {
                failure_threshold,
                cooldown: Duration::from_secs(cooldown_secs),
            },
        })
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: format!("{raw:?}: {e}"),
            }),
    }
}

fn positive<T: PartialEq + Default>(value: T, var: &str) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.base_delay, Duration::from_secs(1));
        assert_eq!(config.breaker.failure_threshold, 2);
        assert_eq!(config.breaker.cooldown, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MOVIES_API_HOST", "127.0.0.1"),
            ("MOVIES_API_PORT", "3000"),
            ("RETRY_BASE_DELAY_MS", " 250 "),
            ("BREAKER_COOLDOWN_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.retry.base_delay, Duration::from_millis(250));
        assert_eq!(config.breaker.cooldown, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let err = config_from(&[("MOVIES_API_PORT", "eighty")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvValue { ref var, .. } if var == "MOVIES_API_PORT"
        ));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = config_from(&[("STORE_CHANNEL_CAPACITY", "0")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnvValue {
                var: "STORE_CHANNEL_CAPACITY".into(),
                reason: "must be greater than zero".into(),
            }
        );
    }
}
