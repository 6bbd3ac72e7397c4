//! Operator CLI: run a task list through a recordops gateway

use anyhow::Context;
use clap::{Parser, Subcommand};
use recordops::config::Config;
use recordops::core::batch::{BatchRunner, TaskQueue, page, progress_line, render_table, to_csv};
use recordops::core::commands::{Command, CommandParams};
use recordops::core::record::RecordTypeTable;
use recordops::sdk::CommandClient;
use recordops::utils::logging::init_logging;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "recordops", version, about = "Run record task lists against a recordops gateway")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "RECORDOPS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Send every task of a list and print the status table
    Run {
        /// lookup-fields, edit, create, mass-save, mass-delete or record-type
        #[arg(long)]
        command: Command,

        /// Task file, one task per line; `-` reads standard input
        #[arg(long, default_value = "-")]
        tasks: String,

        /// Gateway base URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Internal id probed by record-type
        #[arg(long)]
        record: Option<String>,

        /// Write the CSV export here
        #[arg(long)]
        csv: Option<PathBuf>,

        /// First row of the status table (1-based)
        #[arg(long, default_value_t = 1)]
        page_start: usize,

        /// Rows in the status table
        #[arg(long)]
        page_count: Option<usize>,
    },

    /// Print record type names, e.g. to build a record-type task list
    RecordTypes,

    /// Print every field and sublist of one record as JSON
    Details {
        record_type: String,
        id: String,

        /// Gateway base URL
        #[arg(long)]
        endpoint: Option<String>,
    },
}

async fn read_tasks(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("Failed to read tasks from standard input")?;
        Ok(input)
    } else {
        tokio::fs::read_to_string(Path::new(source))
            .await
            .with_context(|| format!("Failed to read task file {}", source))
    }
}

fn client(config: &Config, endpoint: Option<String>) -> anyhow::Result<CommandClient> {
    let mut runner = config.runner().clone();
    if let Some(endpoint) = endpoint {
        runner.endpoint = endpoint;
    }
    runner
        .validate()
        .map_err(|e| anyhow::anyhow!("Runner config error: {}", e))?;
    Ok(CommandClient::from_config(&runner)?)
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).await?;
    init_logging(config.logging())?;

    match cli.action {
        Action::Run {
            command,
            tasks,
            endpoint,
            record,
            csv,
            page_start,
            page_count,
        } => {
            let input = read_tasks(&tasks).await?;
            let mut queue = TaskQueue::from_lines(command, &input);
            if queue.is_empty() {
                println!("No tasks");
                return Ok(());
            }

            let runner = BatchRunner::new(client(&config, endpoint)?, command)
                .with_params(CommandParams { record });
            info!(command = %command, tasks = queue.len(), "Running task list");

            let summary = runner
                .run(&mut queue, |queue| eprintln!("{}", progress_line(queue)))
                .await;

            let count = page_count.unwrap_or(config.runner().page_count);
            print!("{}", render_table(page(&queue, page_start, count)));
            println!(
                "{} completed, {} failed, {} requests",
                summary.completed, summary.failed, summary.requests
            );

            if let Some(path) = csv {
                tokio::fs::write(&path, to_csv(&queue)?)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "CSV export written");
            }
        }
        Action::RecordTypes => {
            let table = RecordTypeTable::with_aliases(config.record_types());
            for name in table.display_names() {
                println!("{}", name);
            }
        }
        Action::Details {
            record_type,
            id,
            endpoint,
        } => {
            let details = client(&config, endpoint)?
                .record_details(&record_type, &id)
                .await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
