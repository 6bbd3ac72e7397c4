//! Integration tests for recordops
//!
//! These tests drive the public API against the seeded in-memory record
//! store; nothing leaves the process except the wiremock suite's loopback calls.

pub mod client_tests;
pub mod command_tests;
pub mod config_tests;
pub mod runner_tests;
pub mod server_tests;
