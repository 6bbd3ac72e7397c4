//! Logging utilities
//!
//! This module provides structured logging setup on top of `tracing`.

pub mod logging;

pub use logging::*;
