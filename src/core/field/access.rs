//! Uniform read/write access to body fields and sublist line fields

use crate::core::record::{FieldInfo, FieldValue, Record};
use crate::utils::error::Result;

/// Read and write one addressing context of a record
pub trait FieldAccess {
    /// Name used in messages, e.g. `memo` or `item/2/amount`
    fn describe(&self, field_id: &str) -> String;

    fn info(&self, record: &dyn Record, field_id: &str) -> Result<FieldInfo>;

    fn text(&self, record: &dyn Record, field_id: &str) -> Result<FieldValue>;

    fn value(&self, record: &dyn Record, field_id: &str) -> Result<FieldValue>;

    fn set_text(&self, record: &mut dyn Record, field_id: &str, text: FieldValue) -> Result<()>;

    fn set_value(&self, record: &mut dyn Record, field_id: &str, value: FieldValue) -> Result<()>;
}

/// Fields on the record body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyField;

impl FieldAccess for BodyField {
    fn describe(&self, field_id: &str) -> String {
        field_id.to_string()
    }

    fn info(&self, record: &dyn Record, field_id: &str) -> Result<FieldInfo> {
        record.field_info(field_id)
    }

    fn text(&self, record: &dyn Record, field_id: &str) -> Result<FieldValue> {
        record.text(field_id)
    }

    fn value(&self, record: &dyn Record, field_id: &str) -> Result<FieldValue> {
        record.value(field_id)
    }

    fn set_text(&self, record: &mut dyn Record, field_id: &str, text: FieldValue) -> Result<()> {
        record.set_text(field_id, text)
    }

    fn set_value(&self, record: &mut dyn Record, field_id: &str, value: FieldValue) -> Result<()> {
        record.set_value(field_id, value)
    }
}

/// Fields on one resolved sublist line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SublistField {
    pub sublist_id: String,
    pub line: usize,
}

impl SublistField {
    pub fn new(sublist_id: impl Into<String>, line: usize) -> Self {
        Self {
            sublist_id: sublist_id.into(),
            line,
        }
    }
}

impl FieldAccess for SublistField {
    fn describe(&self, field_id: &str) -> String {
        format!("{}/{}/{}", self.sublist_id, self.line, field_id)
    }

    fn info(&self, record: &dyn Record, field_id: &str) -> Result<FieldInfo> {
        record.sublist_field_info(&self.sublist_id, field_id)
    }

    fn text(&self, record: &dyn Record, field_id: &str) -> Result<FieldValue> {
        record.sublist_text(&self.sublist_id, field_id, self.line)
    }

    fn value(&self, record: &dyn Record, field_id: &str) -> Result<FieldValue> {
        record.sublist_value(&self.sublist_id, field_id, self.line)
    }

    fn set_text(&self, record: &mut dyn Record, field_id: &str, text: FieldValue) -> Result<()> {
        record.set_sublist_text(&self.sublist_id, field_id, self.line, text)
    }

    fn set_value(&self, record: &mut dyn Record, field_id: &str, value: FieldValue) -> Result<()> {
        record.set_sublist_value(&self.sublist_id, field_id, self.line, value)
    }
}

/// Where a written field lives, kept so the field can be read back after reload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAddress {
    Body,
    Line(SublistField),
}

impl FieldAddress {
    pub fn line(sublist_id: impl Into<String>, line: usize) -> Self {
        FieldAddress::Line(SublistField::new(sublist_id, line))
    }

    pub fn access(&self) -> &dyn FieldAccess {
        match self {
            FieldAddress::Body => &BodyField,
            FieldAddress::Line(field) => field,
        }
    }
}
