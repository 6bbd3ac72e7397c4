//! HTTP server implementation
//!
//! This module provides the command gateway: the actix-web server, its shared
//! state and the routes.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;
mod utils;

pub use builder::{ServerBuilder, load_store, run_server};
pub use server::HttpServer;
pub use state::AppState;
