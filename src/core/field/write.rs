//! Kind-aware field writes
//!
//! Select and multiselect assignments address options either by id (every
//! element is an integer) or by text (no element is). The current value is
//! compared first and the write is skipped when nothing would change.

use super::access::FieldAddress;
use crate::core::expr::{AssignedText, Assignment};
use crate::core::record::{FieldKind, FieldValue, Record};
use crate::utils::error::{RecordOpsError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());

fn is_integer(text: &str) -> bool {
    INTEGER.is_match(text.trim())
}

/// Which representation a write went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Text,
    Value,
}

/// Everything needed to validate a write after reload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub field_id: String,
    pub address: FieldAddress,
    pub selector: Selector,
    pub before: String,
    pub attempted: String,
    /// False when the value already matched and no write was issued
    pub written: bool,
}

impl WriteReceipt {
    /// Read the field back, in the same representation it was written
    pub fn read_back(&self, record: &dyn Record) -> Result<String> {
        let access = self.address.access();
        let current = match self.selector {
            Selector::Text => access.text(record, &self.field_id)?,
            Selector::Value => access.value(record, &self.field_id)?,
        };
        Ok(current.to_string())
    }
}

/// Apply one assignment at `address`
pub fn write_field(
    record: &mut dyn Record,
    address: FieldAddress,
    assignment: &Assignment,
) -> Result<WriteReceipt> {
    let access = address.access();
    let field_id = assignment.field_id.as_str();
    let info = access.info(record, field_id)?;
    let multi = info.kind == FieldKind::MultiSelect;

    if assignment.text.is_multi() && !multi {
        return Err(RecordOpsError::MultiValueNotAllowed {
            field: access.describe(field_id),
            text: assignment.text.to_string(),
        });
    }

    let (selector, before, requested) = match (&assignment.text, info.kind) {
        (AssignedText::Single(text), FieldKind::Plain) => (
            Selector::Text,
            access.text(record, field_id)?,
            FieldValue::Scalar(text.clone()),
        ),
        (text, _) => {
            let elements = text.as_list();
            let ids = elements.iter().filter(|element| is_integer(element)).count();
            if ids != 0 && ids != elements.len() {
                return Err(RecordOpsError::AmbiguousSelector {
                    field: access.describe(field_id),
                    text: text.to_string(),
                });
            }

            if ids == elements.len() {
                let trimmed: Vec<String> = elements.iter().map(|id| id.trim().to_string()).collect();
                (
                    Selector::Value,
                    access.value(record, field_id)?,
                    FieldValue::from_list(trimmed, multi),
                )
            } else {
                (
                    Selector::Text,
                    access.text(record, field_id)?,
                    FieldValue::from_list(elements, multi),
                )
            }
        }
    };

    let unchanged = match info.kind {
        FieldKind::Plain => before.to_string() == requested.to_string(),
        _ => before.as_list() == requested.as_list(),
    };

    if !unchanged {
        match selector {
            Selector::Text => access.set_text(record, field_id, requested.clone())?,
            Selector::Value => access.set_value(record, field_id, requested.clone())?,
        }
    }

    Ok(WriteReceipt {
        field_id: field_id.to_string(),
        selector,
        before: before.to_string(),
        attempted: requested.to_string(),
        written: !unchanged,
        address,
    })
}
