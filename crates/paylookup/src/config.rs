use std::{env, str::FromStr, time::Duration};

use paylookup_core::payment::LookupPolicy;
use thiserror::Error;

#[cfg(feature = "dynamodb")]
use crate::storage::StoreConfig;

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which record store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    DynamoDb,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" => Ok(StoreBackend::Memory),
            "dynamodb" => Ok(StoreBackend::DynamoDb),
            _ => Err(()),
        }
    }
}

/// Transport status used when a lookup finds nothing.
///
/// The body is the not-found envelope either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotFoundStatus {
    /// 200, the not-found result is an ordinary envelope.
    #[default]
    Ok,
    /// 404.
    NotFound,
}

impl FromStr for NotFoundStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "200" | "ok" => Ok(NotFoundStatus::Ok),
            "404" | "not-found" => Ok(NotFoundStatus::NotFound),
            _ => Err(()),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Record store backend (default: memory)
    pub store_backend: StoreBackend,
    /// How get-by-id picks one record of a partition (default: most-recent)
    pub lookup_policy: LookupPolicy,
    /// Status code for a not-found lookup (default: 200)
    pub not_found_status: NotFoundStatus,
    /// Whole-request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Load the sample records into the in-memory store (default: true)
    pub seed_demo_data: bool,
    /// DynamoDB connection settings.
    #[cfg(feature = "dynamodb")]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORE_BACKEND` - `memory` or `dynamodb` (default: memory)
    /// - `LOOKUP_POLICY` - `first-found`, `most-recent` or `require-status` (default: most-recent)
    /// - `NOT_FOUND_STATUS` - `200` or `404` (default: 200)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    /// - `SEED_DEMO_DATA` - `true` or `false` (default: true)
    ///
    /// DynamoDB settings are read by [`StoreConfig`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable lookup.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            store_backend: parse_var(&get, "STORE_BACKEND")?.unwrap_or_default(),
            lookup_policy: parse_var(&get, "LOOKUP_POLICY")?.unwrap_or_default(),
            not_found_status: parse_var(&get, "NOT_FOUND_STATUS")?.unwrap_or_default(),
            request_timeout_secs: parse_var(&get, "REQUEST_TIMEOUT_SECS")?.unwrap_or(10),
            seed_demo_data: parse_var(&get, "SEED_DEMO_DATA")?.unwrap_or(true),
            #[cfg(feature = "dynamodb")]
            store: StoreConfig::from_vars(&get),
        })
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::default(),
            lookup_policy: LookupPolicy::default(),
            not_found_status: NotFoundStatus::default(),
            request_timeout_secs: 10,
            seed_demo_data: true,
            #[cfg(feature = "dynamodb")]
            store: StoreConfig::from_vars(|_| None),
        }
    }
}

fn parse_var<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match get(key) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
