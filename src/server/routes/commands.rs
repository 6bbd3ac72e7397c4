//! Task batch endpoint
//!
//! `POST /commands/{command}` takes a JSON array of task strings and answers
//! with one result string per task, in order.

use crate::core::commands::{Command, CommandParams};
use crate::server::state::AppState;
use crate::utils::error::{RecordOpsError, Result};
use actix_web::{HttpResponse, web};
use tracing::{info, warn};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/commands/{command}", web::post().to(run_command));
}

/// Run one command over the posted tasks
///
/// Record store calls are synchronous, so the batch runs on the blocking pool.
pub async fn run_command(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<CommandParams>,
    tasks: web::Json<Vec<String>>,
) -> Result<HttpResponse> {
    let command: Command = path.into_inner().parse()?;
    let params = query.into_inner();
    let tasks = tasks.into_inner();
    info!(command = %command, batch_size = tasks.len(), "Command request received");

    let context = state.commands.clone();
    let results = web::block(move || context.execute(command, &tasks, &params))
        .await
        .map_err(|e| RecordOpsError::server(format!("Command worker failed: {}", e)))?
        .inspect_err(|e| warn!(command = %command, error = %e, "Command rejected"))?;

    Ok(HttpResponse::Ok().json(results))
}
