//! `record-type`: does the probed internal id exist under this type?

use super::CommandContext;
use crate::utils::error::Result;

pub(super) fn detect_task(context: &CommandContext, task: &str, record_id: &str) -> Result<String> {
    if task.trim().is_empty() {
        return Ok("Record Type not specified".to_string());
    }

    let record_type = context.record_types.resolve(task);
    Ok(match context.store.load(&record_type, record_id) {
        Ok(_) => "Yes".to_string(),
        Err(e) => format!("No: {}", e),
    })
}
