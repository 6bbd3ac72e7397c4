//! Batch runner configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Settings for the client-side batch runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Base URL of the command gateway
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Rows per status page
    #[serde(default = "default_page_count")]
    pub page_count: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            page_count: default_page_count(),
        }
    }
}

impl RunnerConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.endpoint != default_endpoint() {
            self.endpoint = other.endpoint;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        if other.page_count != default_page_count() {
            self.page_count = other.page_count;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid endpoint '{}': {}", self.endpoint, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!("Endpoint must be http(s): {}", self.endpoint));
        }
        if self.timeout == 0 {
            return Err("Timeout cannot be 0".to_string());
        }
        if self.page_count == 0 {
            return Err("Page count cannot be 0".to_string());
        }
        Ok(())
    }
}
