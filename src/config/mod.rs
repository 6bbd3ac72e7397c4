//! Configuration management
//!
//! This module handles loading, validation, and merging of gateway and runner configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{RecordOpsError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Configuration document
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RecordOpsError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| RecordOpsError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Load a file when given, then overlay the environment
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        let config = base.merge(Self::from_env()?);
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get store configuration
    pub fn store(&self) -> &StoreConfig {
        &self.gateway.store
    }

    /// Get record type aliases
    pub fn record_types(&self) -> &RecordTypeAliases {
        &self.gateway.record_types
    }

    /// Get runner configuration
    pub fn runner(&self) -> &RunnerConfig {
        &self.gateway.runner
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| RecordOpsError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .store
            .validate()
            .map_err(|e| RecordOpsError::Config(format!("Store config error: {}", e)))?;

        self.gateway
            .record_types
            .validate()
            .map_err(|e| RecordOpsError::Config(format!("Record types config error: {}", e)))?;

        self.gateway
            .runner
            .validate()
            .map_err(|e| RecordOpsError::Config(format!("Runner config error: {}", e)))?;

        self.gateway
            .logging
            .validate()
            .map_err(|e| RecordOpsError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| RecordOpsError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
