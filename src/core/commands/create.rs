//! `create`: `Type|DefaultValues|FieldValues`

use super::{CommandContext, apply_assignments, columns};
use crate::core::expr::{column, parse_assignment_list};
use crate::core::field::FieldAddress;
use crate::core::validation::validate_checks;
use crate::utils::error::Result;
use tracing::info;

/// Create, apply defaults, save; then load, apply field values, save; then validate both
pub(super) fn create_task(context: &CommandContext, task: &str) -> Result<String> {
    let columns = columns(task);
    let record_type = context.record_types.resolve(column(&columns, 0));
    if record_type.is_empty() {
        return Ok("Record Type not specified".to_string());
    }

    let defaults = parse_assignment_list(column(&columns, 1))?;
    let values = parse_assignment_list(column(&columns, 2))?;

    let mut created = context.store.create(&record_type)?;
    let mut checks = apply_assignments(created.as_mut(), &FieldAddress::Body, &defaults);
    let id = created.save()?;

    let mut loaded = context.store.load(&record_type, &id)?;
    checks.extend(apply_assignments(
        loaded.as_mut(),
        &FieldAddress::Body,
        &values,
    ));
    loaded.save()?;

    let reload = context.store.load(&record_type, &id)?;
    let messages = validate_checks(&checks, reload.as_ref());
    info!(record_type = %record_type, id = %id, "Created record");

    if messages.is_empty() {
        Ok(format!("Internal ID: {}", id))
    } else {
        Ok(format!("Internal ID: {} | {}", id, messages.join(" | ")))
    }
}
