//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for wiring a record store into the
//! gateway and the run_server function used by the gateway binary.

use crate::config::Config;
use crate::core::commands::CommandContext;
use crate::core::record::{Fixture, MemoryRecordStore, RecordStore, RecordTypeTable};
use crate::server::server::HttpServer;
use crate::utils::error::{RecordOpsError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    store: Option<Arc<dyn RecordStore>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `store` instead of the configured in-memory store
    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| RecordOpsError::Config("Configuration is required".to_string()))?;

        let store = match self.store {
            Some(store) => store,
            None => Arc::new(load_store(&config).await?),
        };
        let context = CommandContext::new(store, RecordTypeTable::with_aliases(config.record_types()));

        Ok(HttpServer::new(&config, context))
    }
}

/// In-memory store, seeded from the configured fixture when there is one
pub async fn load_store(config: &Config) -> Result<MemoryRecordStore> {
    match &config.store().fixture_path {
        Some(path) => {
            info!(fixture = %path, "Seeding record store from fixture");
            Fixture::from_file(path).await?.into_store()
        }
        None => {
            info!("No fixture configured, starting with an empty record store");
            Ok(MemoryRecordStore::new())
        }
    }
}

/// Build and run the gateway
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting recordops gateway");

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /version - Build information");
    info!("   POST /commands/{{command}} - Run a task batch");
    info!("   GET  /records/{{type}}/{{id}} - Record details");

    server.start().await
}
