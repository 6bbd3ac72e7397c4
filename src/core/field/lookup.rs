//! Field reads for lookups

use super::access::{BodyField, FieldAccess, SublistField};
use crate::core::expr::{Path, is_line_count_field};
use crate::core::lines::resolve_single_line;
use crate::core::record::Record;
use crate::utils::error::{RecordOpsError, Result};

/// Text of one field, followed by ` | <value>` when the raw value differs
///
/// A failure to read the text is reported inline so that one bad field does
/// not hide the others.
fn render(access: &dyn FieldAccess, record: &dyn Record, field_id: &str) -> Result<(String, String)> {
    let text = access
        .text(record, field_id)
        .map(|text| text.to_string())
        .unwrap_or_else(|e| format!("Error: {}", e));
    let value = access.value(record, field_id)?.to_string();

    let suffix = if !value.is_empty() && value != text {
        format!(" | {}", value)
    } else {
        String::new()
    };
    Ok((text, suffix))
}

fn require_sublist(record: &dyn Record, sublist_id: &str) -> Result<()> {
    if record.has_sublist(sublist_id) {
        Ok(())
    } else {
        Err(RecordOpsError::SublistNotFound(sublist_id.to_string()))
    }
}

/// Read `field_id` at `path`
pub fn lookup_field(record: &dyn Record, field_id: &str, path: &Path) -> Result<String> {
    match path {
        Path::Body => {
            let (text, suffix) = render(&BodyField, record, field_id)?;
            Ok(text + &suffix)
        }
        Path::Sublist(sublist_id) => {
            require_sublist(record, sublist_id)?;
            if is_line_count_field(field_id) {
                Ok(record.line_count(sublist_id)?.to_string())
            } else {
                Err(RecordOpsError::UnsupportedPath(format!(
                    "{} needs a line query",
                    sublist_id
                )))
            }
        }
        Path::Line { sublist_id, query } => {
            require_sublist(record, sublist_id)?;
            let line = resolve_single_line(record, sublist_id, query)?;
            let (text, suffix) = render(&SublistField::new(sublist_id.as_str(), line), record, field_id)?;
            Ok(format!("{} | line {}{}", text, line, suffix))
        }
    }
}

/// Read several fields at the same path, joined with ` | `
pub fn lookup_fields(record: &dyn Record, field_ids: &[String], path: &Path) -> Result<String> {
    let texts = field_ids
        .iter()
        .map(|field_id| lookup_field(record, field_id, path))
        .collect::<Result<Vec<_>>>()?;
    Ok(texts.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{Fixture, RecordStore};

    const FIXTURE: &str = r#"
record_types:
  salesorder:
    fields:
      - { id: memo }
      - { id: entity, kind: select, options: [{ id: "42", text: ACME Corp }] }
      - { id: status, kind: select }
    sublists:
      - id: item
        fields:
          - { id: item, kind: select, options: [{ id: "7", text: Widget }, { id: "8", text: Gadget }] }
          - { id: quantity }
records:
  - type: salesorder
    id: "5"
    fields: { memo: Rush, entity: "42" }
    sublists:
      item:
        - { item: "7", quantity: 2 }
        - { item: "8", quantity: 1 }
"#;

    fn record() -> Box<dyn Record> {
        Fixture::parse(FIXTURE)
            .unwrap()
            .into_store()
            .unwrap()
            .load("salesorder", "5")
            .unwrap()
    }

    #[test]
    fn test_body_field_with_value_suffix() {
        let record = record();
        assert_eq!(
            lookup_field(record.as_ref(), "entity", &Path::Body).unwrap(),
            "ACME Corp | 42"
        );
        assert_eq!(lookup_field(record.as_ref(), "memo", &Path::Body).unwrap(), "Rush");
        assert_eq!(lookup_field(record.as_ref(), "status", &Path::Body).unwrap(), "");
    }

    #[test]
    fn test_line_count() {
        let record = record();
        let path = Path::parse("item").unwrap();
        assert_eq!(lookup_field(record.as_ref(), "count", &path).unwrap(), "2");
        assert_eq!(lookup_field(record.as_ref(), "linecount", &path).unwrap(), "2");
        assert!(matches!(
            lookup_field(record.as_ref(), "quantity", &path),
            Err(RecordOpsError::UnsupportedPath(_))
        ));
    }

    #[test]
    fn test_sublist_field_reports_line() {
        let record = record();
        let path = Path::parse("item/item=Gadget").unwrap();
        assert_eq!(
            lookup_fields(
                record.as_ref(),
                &["item".to_string(), "quantity".to_string()],
                &path
            )
            .unwrap(),
            "Gadget | line 1 | 8 | 1 | line 1"
        );
    }

    #[test]
    fn test_unknown_sublist() {
        let record = record();
        let path = Path::parse("expense/0").unwrap();
        assert!(matches!(
            lookup_field(record.as_ref(), "amount", &path),
            Err(RecordOpsError::SublistNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_field_propagates() {
        let record = record();
        let err = lookup_field(record.as_ref(), "nope", &Path::Body).unwrap_err();
        assert!(matches!(err, RecordOpsError::FieldNotFound(_)));
    }
}
