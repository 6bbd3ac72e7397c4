//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::commands::CommandContext;
use std::sync::Arc;

/// HTTP server state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Record store and record type table used by every command
    pub commands: CommandContext,
}

impl AppState {
    pub fn new(config: Config, commands: CommandContext) -> Self {
        Self {
            config: Arc::new(config),
            commands,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
