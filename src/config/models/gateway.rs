//! Main gateway configuration

use super::*;
use crate::utils::error::{RecordOpsError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main configuration document
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Additional record type aliases
    #[serde(default)]
    pub record_types: RecordTypeAliases,
    /// Batch runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| RecordOpsError::config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

impl GatewayConfig {
    /// Load configuration from `RECORDOPS_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("RECORDOPS_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_env("RECORDOPS_PORT")? {
            config.server.port = port;
        }
        if let Some(workers) = parse_env("RECORDOPS_WORKERS")? {
            config.server.workers = Some(workers);
        }
        if let Ok(fixture) = env::var("RECORDOPS_FIXTURE") {
            config.store.fixture_path = Some(fixture);
        }
        if let Ok(endpoint) = env::var("RECORDOPS_ENDPOINT") {
            config.runner.endpoint = endpoint;
        }
        if let Some(timeout) = parse_env("RECORDOPS_TIMEOUT")? {
            config.runner.timeout = timeout;
        }
        if let Ok(level) = env::var("RECORDOPS_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.store = self.store.merge(other.store);
        self.record_types = self.record_types.merge(other.record_types);
        self.runner = self.runner.merge(other.runner);
        self.logging = self.logging.merge(other.logging);
        self
    }
}
