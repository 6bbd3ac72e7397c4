//! Record details endpoint

use crate::core::commands::record_details;
use crate::server::state::AppState;
use crate::utils::error::{RecordOpsError, Result};
use actix_web::{HttpResponse, web};
use tracing::debug;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/records/{record_type}/{id}", web::get().to(get_record))
        .route("/record-types", web::get().to(list_record_types));
}

/// Every field and sublist of one record
pub async fn get_record(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (record_type, id) = path.into_inner();
    debug!(record_type = %record_type, record_id = %id, "Record details requested");

    let context = state.commands.clone();
    let details = web::block(move || record_details(&context, &record_type, &id))
        .await
        .map_err(|e| RecordOpsError::server(format!("Record worker failed: {}", e)))??;

    Ok(HttpResponse::Ok().json(details))
}

/// Display names of the known record types
pub async fn list_record_types(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.commands.record_types.display_names())
}
