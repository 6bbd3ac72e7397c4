//! recordops gateway - batch command endpoint over a record store

#![allow(missing_docs)]

use clap::Parser;
use recordops::config::Config;
use recordops::server;
use recordops::utils::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "recordops-gateway", version, about = "Batch command gateway over a record store")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "RECORDOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Bind host, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Fixture seeding the in-memory record store
    #[arg(long)]
    fixture: Option<String>,
}

async fn load_config(args: &Args) -> recordops::Result<Config> {
    let mut config = Config::load(args.config.as_deref()).await?;

    if let Some(host) = &args.host {
        config.gateway.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.gateway.server.port = port;
    }
    if let Some(fixture) = &args.fixture {
        config.gateway.store.fixture_path = Some(fixture.clone());
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
