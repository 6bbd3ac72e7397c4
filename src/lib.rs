//! # recordops
//!
//! Path and assignment expressions over hierarchical business records, a
//! batch command gateway that applies them, and a client runner that feeds
//! task lists to the gateway.
//!
//! ## Features
//!
//! - **Expressions**: escaping-aware `|`, `/` and `&` splitting, `fieldId=text`
//!   assignments, and `sublist/line` paths with numeric or field-filter line queries
//! - **Validated writes**: every edit is re-read after save and classified as
//!   confirmed, no-op, failed, anomalous or drifted
//! - **Command gateway**: lookup, edit, create, mass save/delete and record type
//!   detection over any [`core::record::RecordStore`]
//! - **Batch runner**: strictly sequential, same-record edits grouped into one request
//!
//! ## Running a batch
//!
//! ```rust,no_run
//! use recordops::core::batch::{BatchRunner, TaskQueue, progress_line};
//! use recordops::core::commands::Command;
//! use recordops::sdk::CommandClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CommandClient::new("http://127.0.0.1:8070", Duration::from_secs(30))?;
//!     let runner = BatchRunner::new(client, Command::Edit);
//!
//!     let mut queue = TaskQueue::from_lines(
//!         Command::Edit,
//!         "Customer|123||firstname=Jane|set\nSalesOrder|500|item/-1|quantity=3|set",
//!     );
//!     runner
//!         .run(&mut queue, |queue| println!("{}", progress_line(queue)))
//!         .await;
//!     Ok(())
//! }
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use recordops::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod sdk;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{RecordOpsError, Result, StoreError};

use tracing::info;

/// The command gateway: configuration plus a ready HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::ServerBuilder::new()
            .with_config(config.clone())
            .build()
            .await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting recordops gateway");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Information stamped by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
