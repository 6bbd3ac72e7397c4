//! Configuration data models
//!
//! This module defines all configuration structures used by the gateway and the runner.

pub mod gateway;
pub mod logging;
pub mod runner;
pub mod server;
pub mod store;

// Re-export all configuration types
pub use gateway::*;
pub use logging::*;
pub use runner::*;
pub use server::*;
pub use store::*;

/// Default values for configuration
pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8070
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    2 * 1024 * 1024 // 2MB
}

/// Default command endpoint used by the runner
pub fn default_endpoint() -> String {
    format!("http://{}:{}", default_host(), default_port())
}

/// Rows shown per status page
pub fn default_page_count() -> usize {
    100
}

pub fn default_log_level() -> String {
    "info".to_string()
}
