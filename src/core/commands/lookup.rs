//! `lookup-fields`: `Type|Id|Location|FieldIds`

use super::{CommandContext, RecordRef, columns};
use crate::core::expr::{Delimiter, Path, column, normalize_key};
use crate::core::field::lookup_fields;
use crate::utils::error::Result;

pub(super) fn lookup_task(context: &CommandContext, task: &str) -> Result<String> {
    if task.is_empty() {
        return Ok("Empty".to_string());
    }

    let columns = columns(task);
    let record_ref = RecordRef::from_columns(context, &columns);
    let path = Path::parse(column(&columns, 2))?;
    // `fieldId=...` is accepted so edit task lists can be reused as lookups
    let field_ids: Vec<String> = Delimiter::Ampersand
        .split(column(&columns, 3))
        .iter()
        .map(|token| normalize_key(token.split_once('=').map_or(token.as_str(), |(id, _)| id)))
        .collect();

    let record = context
        .store
        .load(&record_ref.record_type, &record_ref.id)?;

    if field_ids.is_empty() {
        return Ok("Please specify Field ID".to_string());
    }

    lookup_fields(record.as_ref(), &field_ids, &path)
}
