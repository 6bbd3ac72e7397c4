//! Command gateway SDK
//!
//! HTTP client for the gateway's command endpoint, usable directly or as the
//! batch runner's transport.

pub mod client;

pub use client::CommandClient;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
