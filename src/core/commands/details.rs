//! Full field and sublist dump of one record

use super::CommandContext;
use crate::core::expr::normalize_key;
use crate::core::record::{FieldKind, Record};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetails {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_if_different: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDetails {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCell {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SublistDetails {
    pub id: String,
    pub fields: Vec<ColumnDetails>,
    pub lines: Vec<Vec<LineCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetails {
    pub record_type: String,
    pub id: String,
    pub fields: Vec<FieldDetails>,
    pub sublists: Vec<SublistDetails>,
}

fn inline_error<T: ToString>(result: Result<T>) -> String {
    result
        .map(|text| text.to_string())
        .unwrap_or_else(|e| format!("Error: {}", e))
}

fn field_details(record: &dyn Record, field_id: &str) -> Result<FieldDetails> {
    let info = record.field_info(field_id)?;
    let text = inline_error(record.text(field_id));
    let value = record.value(field_id)?.to_string();

    Ok(FieldDetails {
        id: field_id.to_string(),
        label: info.label,
        kind: info.kind,
        value_if_different: (!value.is_empty() && value != text).then_some(value),
        text,
    })
}

fn sublist_details(record: &dyn Record, sublist_id: &str) -> Result<SublistDetails> {
    let field_ids = record.sublist_field_ids(sublist_id)?;
    let fields = field_ids
        .iter()
        .map(|field_id| {
            record
                .sublist_field_info(sublist_id, field_id)
                .map(|info| ColumnDetails {
                    id: info.id,
                    label: info.label,
                    kind: info.kind,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut lines = Vec::new();
    for line in 0..record.line_count(sublist_id)? {
        let cells = field_ids
            .iter()
            .map(|field_id| -> Result<LineCell> {
                Ok(LineCell {
                    value: record.sublist_value(sublist_id, field_id, line)?.to_string(),
                    text: inline_error(record.sublist_text(sublist_id, field_id, line)),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        lines.push(cells);
    }

    Ok(SublistDetails {
        id: sublist_id.to_string(),
        fields,
        lines,
    })
}

/// Load `record_type`/`id` and describe every field and sublist line
pub fn record_details(context: &CommandContext, record_type: &str, id: &str) -> Result<RecordDetails> {
    let record_type = context.record_types.resolve(record_type);
    let id = normalize_key(id);
    let record = context.store.load(&record_type, &id)?;

    let fields = record
        .field_ids()
        .iter()
        .map(|field_id| field_details(record.as_ref(), field_id))
        .collect::<Result<Vec<_>>>()?;
    let sublists = record
        .sublist_ids()
        .iter()
        .map(|sublist_id| sublist_details(record.as_ref(), sublist_id))
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordDetails {
        record_type,
        id,
        fields,
        sublists,
    })
}
