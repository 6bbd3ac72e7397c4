//! Record store boundary
//!
//! Everything the command layer knows about records goes through these two
//! traits. Implementations decide how records are persisted and how their
//! own consistency is kept; callers only load, mutate, save and reload.

use super::types::{FieldInfo, FieldValue};
use crate::utils::error::Result;

/// A loaded (or freshly created, unsaved) record
///
/// Mutations only touch this instance until [`Record::save`] is called.
pub trait Record: Send {
    fn record_type(&self) -> &str;

    /// Internal id, `None` until a created record is first saved
    fn id(&self) -> Option<&str>;

    /// Body field ids in store order
    fn field_ids(&self) -> Vec<String>;

    /// Sublist ids in store order
    fn sublist_ids(&self) -> Vec<String>;

    fn sublist_field_ids(&self, sublist_id: &str) -> Result<Vec<String>>;

    fn field_info(&self, field_id: &str) -> Result<FieldInfo>;

    fn sublist_field_info(&self, sublist_id: &str, field_id: &str) -> Result<FieldInfo>;

    /// Human-readable text (option texts for select fields)
    fn text(&self, field_id: &str) -> Result<FieldValue>;

    /// Raw value (option ids for select fields)
    fn value(&self, field_id: &str) -> Result<FieldValue>;

    fn set_text(&mut self, field_id: &str, text: FieldValue) -> Result<()>;

    fn set_value(&mut self, field_id: &str, value: FieldValue) -> Result<()>;

    fn sublist_text(&self, sublist_id: &str, field_id: &str, line: usize) -> Result<FieldValue>;

    fn sublist_value(&self, sublist_id: &str, field_id: &str, line: usize) -> Result<FieldValue>;

    fn set_sublist_text(
        &mut self,
        sublist_id: &str,
        field_id: &str,
        line: usize,
        text: FieldValue,
    ) -> Result<()>;

    fn set_sublist_value(
        &mut self,
        sublist_id: &str,
        field_id: &str,
        line: usize,
        value: FieldValue,
    ) -> Result<()>;

    fn line_count(&self, sublist_id: &str) -> Result<usize>;

    /// Insert an empty line before `line`; `line == line_count` appends
    fn insert_line(&mut self, sublist_id: &str, line: usize, ignore_recalc: bool) -> Result<()>;

    fn remove_line(&mut self, sublist_id: &str, line: usize, ignore_recalc: bool) -> Result<()>;

    /// Persist and return the internal id
    fn save(&mut self) -> Result<String>;

    fn has_sublist(&self, sublist_id: &str) -> bool {
        self.sublist_ids().iter().any(|id| id == sublist_id)
    }
}

/// Loads, creates and deletes records by type and internal id
pub trait RecordStore: Send + Sync {
    fn load(&self, record_type: &str, id: &str) -> Result<Box<dyn Record>>;

    /// New unsaved record with the type's defaults
    fn create(&self, record_type: &str) -> Result<Box<dyn Record>>;

    fn delete(&self, record_type: &str, id: &str) -> Result<()>;
}
