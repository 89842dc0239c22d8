use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::auth::password::DEFAULT_HASH_COST;
use crate::domain::timeouts::OperationTimeouts;

/// Which document store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration read from the environment
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub secret_key: String,
    pub bcrypt_cost: u32,
    pub timeouts: OperationTimeouts,
    pub store_backend: StoreBackend,
}

impl AppConfig {
    /// Loads configuration from process environment variables
    ///
    /// `SECRET_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_key = lookup("SECRET_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let defaults = OperationTimeouts::default();

        Ok(Self {
            port: parse_or(&lookup, "PORT", 8000)?,
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "Ecommerce".to_string()),
            secret_key,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", DEFAULT_HASH_COST)?,
            timeouts: OperationTimeouts {
                short: Duration::from_secs(parse_or(
                    &lookup,
                    "SHORT_TIMEOUT_SECS",
                    defaults.short.as_secs(),
                )?),
                long: Duration::from_secs(parse_or(
                    &lookup,
                    "LONG_TIMEOUT_SECS",
                    defaults.long.as_secs(),
                )?),
            },
            store_backend: parse_or(&lookup, "STORE_BACKEND", StoreBackend::Mongo)?,
        })
    }

    /// Address the HTTP server binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("mongodb_uri", &self.mongodb_uri)
            .field("database_name", &self.database_name)
            .field("secret_key", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("timeouts", &self.timeouts)
            .field("store_backend", &self.store_backend)
            .finish()
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup(&[("SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_name, "Ecommerce");
        assert_eq!(config.bcrypt_cost, 14);
        assert_eq!(config.timeouts.short, Duration::from_secs(5));
        assert_eq!(config.timeouts.long, Duration::from_secs(100));
        assert_eq!(config.store_backend, StoreBackend::Mongo);
    }

    #[test]
    fn missing_secret_is_fatal() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("SECRET_KEY"))
        ));
        assert!(AppConfig::from_lookup(lookup(&[("SECRET_KEY", " ")])).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("PORT", "9100"),
            ("BCRYPT_COST", "4"),
            ("SHORT_TIMEOUT_SECS", "1"),
            ("STORE_BACKEND", "memory"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9100");
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.timeouts.short, Duration::from_secs(1));
        assert_eq!(config.store_backend, StoreBackend::Memory);
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = AppConfig::from_lookup(lookup(&[("SECRET_KEY", "s"), ("PORT", "eighty")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for PORT: eighty");
    }

    #[test]
    fn debug_redacts_secret() {
        let config = AppConfig::from_lookup(lookup(&[("SECRET_KEY", "hunter2")])).unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
