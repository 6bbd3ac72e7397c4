//! `mass-save` and `mass-delete`: `Type|Id`

use super::{CommandContext, RecordRef, columns};
use crate::utils::error::{RecordOpsError, Result, StoreError};
use tracing::{info, warn};

/// The record a task names, or the message explaining what is missing
fn target(context: &CommandContext, task: &str) -> std::result::Result<RecordRef, String> {
    let record_ref = RecordRef::from_columns(context, &columns(task));
    if record_ref.record_type.is_empty() {
        return Err("Record Type not specified".to_string());
    }
    if record_ref.id.is_empty() {
        return Err("Internal ID not specified".to_string());
    }
    Ok(record_ref)
}

/// Load and save unchanged so store-side events run
pub(super) fn mass_save_task(context: &CommandContext, task: &str) -> Result<String> {
    let record_ref = match target(context, task) {
        Ok(record_ref) => record_ref,
        Err(message) => return Ok(message),
    };

    let mut record = context
        .store
        .load(&record_ref.record_type, &record_ref.id)?;
    record.save()?;

    info!(record = %record_ref, "Saved record unchanged");
    Ok("Edit/Save".to_string())
}

fn is_not_found(error: &RecordOpsError) -> bool {
    matches!(error, RecordOpsError::Store(StoreError::RecordNotFound { .. }))
}

/// Delete, then confirm by reloading
pub(super) fn mass_delete_task(context: &CommandContext, task: &str) -> Result<String> {
    let record_ref = match target(context, task) {
        Ok(record_ref) => record_ref,
        Err(message) => return Ok(message),
    };
    let RecordRef { record_type, id } = &record_ref;

    let load_suffix = match context.store.load(record_type, id) {
        Ok(_) => String::new(),
        Err(e) if is_not_found(&e) => return Ok("Does not exist".to_string()),
        Err(RecordOpsError::Store(StoreError::InvalidRecordType(_))) => {
            return Ok(format!("Error: record type {} does not exist", record_type));
        }
        Err(e) => format!(" | Load error: {}", e),
    };

    if let Err(e) = context.store.delete(record_type, id) {
        warn!(record = %record_ref, error = %e, "Delete failed");
        return Ok(format!("Delete error: {}{}", e, load_suffix));
    }

    let message = match context.store.load(record_type, id) {
        Ok(_) => format!("Delete failed{}", load_suffix),
        Err(e) if is_not_found(&e) => format!("Delete successful{}", load_suffix),
        Err(e) => format!("Delete error{} | Reload error: {}", load_suffix, e),
    };
    info!(record = %record_ref, result = %message, "Processed delete");
    Ok(message)
}
