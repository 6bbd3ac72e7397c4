//! Core functionality
//!
//! Expression parsing, record access, line resolution, validated writes,
//! the gateway commands and the client-side batch runner.

pub mod batch;
pub mod commands;
pub mod expr;
pub mod field;
pub mod lines;
pub mod record;
pub mod validation;
