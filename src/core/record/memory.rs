//! In-process record store
//!
//! Records live in a shared map keyed by `(type, id)`. A loaded record is an
//! independent copy, so edits stay invisible to other loads until saved.

use super::store::{Record, RecordStore};
use super::types::{FieldInfo, FieldKind, FieldValue};
use crate::utils::error::{RecordOpsError, Result, StoreError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::debug;

/// Sublist definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SublistSchema {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
}

/// Field layout of one record type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub sublists: Vec<SublistSchema>,
}

impl RecordSchema {
    fn field(&self, field_id: &str) -> Result<&FieldInfo> {
        self.fields
            .iter()
            .find(|field| field.id == field_id)
            .ok_or_else(|| RecordOpsError::FieldNotFound(field_id.to_string()))
    }

    fn sublist(&self, sublist_id: &str) -> Result<&SublistSchema> {
        self.sublists
            .iter()
            .find(|sublist| sublist.id == sublist_id)
            .ok_or_else(|| RecordOpsError::SublistNotFound(sublist_id.to_string()))
    }

    fn sublist_field(&self, sublist_id: &str, field_id: &str) -> Result<&FieldInfo> {
        self.sublist(sublist_id)?
            .fields
            .iter()
            .find(|field| field.id == field_id)
            .ok_or_else(|| RecordOpsError::FieldNotFound(format!("{}.{}", sublist_id, field_id)))
    }
}

/// One record to preload, with raw values (option ids for select fields)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordSeed {
    #[serde(rename = "type")]
    pub record_type: String,
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub sublists: BTreeMap<String, Vec<BTreeMap<String, serde_json::Value>>>,
}

type Line = HashMap<String, FieldValue>;

#[derive(Debug, Clone)]
struct RecordData {
    record_type: String,
    id: Option<String>,
    fields: HashMap<String, FieldValue>,
    sublists: HashMap<String, Vec<Line>>,
}

#[derive(Debug)]
struct StoreInner {
    schemas: RwLock<HashMap<String, Arc<RecordSchema>>>,
    records: RwLock<HashMap<(String, String), RecordData>>,
    next_id: AtomicU64,
    saves: AtomicUsize,
}

/// Shared in-memory store; clones point at the same records
#[derive(Debug, Clone)]
pub struct MemoryRecordStore {
    inner: Arc<StoreInner>,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                schemas: RwLock::new(HashMap::new()),
                records: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                saves: AtomicUsize::new(0),
            }),
        }
    }

    /// Register (or replace) the layout of a record type
    pub fn define_type(&self, record_type: impl Into<String>, schema: RecordSchema) {
        self.inner
            .schemas
            .write()
            .insert(record_type.into(), Arc::new(schema));
    }

    /// Store a record directly, without counting a save
    pub fn seed(&self, seed: RecordSeed) -> Result<()> {
        let schema = self.schema(&seed.record_type)?;

        let mut fields = HashMap::new();
        for (field_id, raw) in &seed.fields {
            schema.field(field_id)?;
            fields.insert(field_id.clone(), normalize_raw(FieldValue::from_json(raw)));
        }

        let mut sublists: HashMap<String, Vec<Line>> = schema
            .sublists
            .iter()
            .map(|sublist| (sublist.id.clone(), Vec::new()))
            .collect();
        for (sublist_id, lines) in &seed.sublists {
            let mut rows = Vec::with_capacity(lines.len());
            for line in lines {
                let mut row = Line::new();
                for (field_id, raw) in line {
                    schema.sublist_field(sublist_id, field_id)?;
                    row.insert(field_id.clone(), normalize_raw(FieldValue::from_json(raw)));
                }
                rows.push(row);
            }
            sublists.insert(sublist_id.clone(), rows);
        }

        if let Ok(numeric) = seed.id.parse::<u64>() {
            self.inner.next_id.fetch_max(numeric + 1, Ordering::SeqCst);
        }

        let data = RecordData {
            record_type: seed.record_type.clone(),
            id: Some(seed.id.clone()),
            fields,
            sublists,
        };
        self.inner
            .records
            .write()
            .insert((seed.record_type, seed.id), data);
        Ok(())
    }

    /// Number of successful saves since the store was built
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    pub fn record_count(&self) -> usize {
        self.inner.records.read().len()
    }

    pub fn contains(&self, record_type: &str, id: &str) -> bool {
        self.inner
            .records
            .read()
            .contains_key(&(record_type.to_string(), id.to_string()))
    }

    pub fn record_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.inner.schemas.read().keys().cloned().collect();
        types.sort();
        types
    }

    fn schema(&self, record_type: &str) -> Result<Arc<RecordSchema>> {
        self.inner
            .schemas
            .read()
            .get(record_type)
            .cloned()
            .ok_or_else(|| StoreError::InvalidRecordType(record_type.to_string()).into())
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self, record_type: &str, id: &str) -> Result<Box<dyn Record>> {
        let schema = self.schema(record_type)?;
        let data = self
            .inner
            .records
            .read()
            .get(&(record_type.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::RecordNotFound {
                record_type: record_type.to_string(),
                id: id.to_string(),
            })?;

        debug!(record_type, id, "Loaded record");
        Ok(Box::new(MemoryRecord {
            data,
            schema,
            store: Arc::clone(&self.inner),
        }))
    }

    fn create(&self, record_type: &str) -> Result<Box<dyn Record>> {
        let schema = self.schema(record_type)?;
        let sublists = schema
            .sublists
            .iter()
            .map(|sublist| (sublist.id.clone(), Vec::new()))
            .collect();

        Ok(Box::new(MemoryRecord {
            data: RecordData {
                record_type: record_type.to_string(),
                id: None,
                fields: HashMap::new(),
                sublists,
            },
            schema,
            store: Arc::clone(&self.inner),
        }))
    }

    fn delete(&self, record_type: &str, id: &str) -> Result<()> {
        self.schema(record_type)?;
        self.inner
            .records
            .write()
            .remove(&(record_type.to_string(), id.to_string()))
            .map(|_| debug!(record_type, id, "Deleted record"))
            .ok_or_else(|| {
                StoreError::RecordNotFound {
                    record_type: record_type.to_string(),
                    id: id.to_string(),
                }
                .into()
            })
    }
}

/// Record handed out by [`MemoryRecordStore`]
#[derive(Debug)]
pub struct MemoryRecord {
    data: RecordData,
    schema: Arc<RecordSchema>,
    store: Arc<StoreInner>,
}

fn normalize_raw(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Scalar(text) if text.is_empty() => FieldValue::Empty,
        other => other,
    }
}

fn rejected(message: String) -> RecordOpsError {
    StoreError::Rejected(message).into()
}

fn render_text(info: &FieldInfo, raw: &FieldValue) -> FieldValue {
    let lookup = |id: &String| info.option_text(id).unwrap_or(id).to_string();
    match (info.kind, raw) {
        (FieldKind::Plain, _) | (_, FieldValue::Empty) => raw.clone(),
        (_, FieldValue::Scalar(id)) => FieldValue::Scalar(lookup(id)),
        (_, FieldValue::List(ids)) => FieldValue::List(ids.iter().map(lookup).collect()),
    }
}

/// Turn an incoming text or value into the stored raw form
fn to_raw(info: &FieldInfo, incoming: FieldValue, by_text: bool) -> Result<FieldValue> {
    if info.kind == FieldKind::Plain {
        return match incoming {
            FieldValue::List(_) => Err(rejected(format!(
                "Field {} does not accept multiple values",
                info.id
            ))),
            other => Ok(normalize_raw(other)),
        };
    }

    let resolve = |element: &str| -> Result<String> {
        if by_text {
            info.option_id(element)
                .map(str::to_string)
                .ok_or_else(|| rejected(format!("Invalid option '{}' for field {}", element, info.id)))
        } else if info.options.is_empty() || info.option_text(element).is_some() {
            Ok(element.to_string())
        } else {
            Err(rejected(format!("Invalid option id {} for field {}", element, info.id)))
        }
    };

    let elements = incoming.as_list();
    match info.kind {
        FieldKind::MultiSelect => Ok(FieldValue::List(
            elements
                .iter()
                .map(|element| resolve(element))
                .collect::<Result<_>>()?,
        )),
        _ => match elements.as_slice() {
            [] => Ok(FieldValue::Empty),
            [single] => Ok(FieldValue::Scalar(resolve(single)?)),
            _ => Err(rejected(format!(
                "Field {} does not accept multiple values",
                info.id
            ))),
        },
    }
}

impl MemoryRecord {
    fn lines(&self, sublist_id: &str) -> Result<&Vec<Line>> {
        self.schema.sublist(sublist_id)?;
        self.data
            .sublists
            .get(sublist_id)
            .ok_or_else(|| RecordOpsError::SublistNotFound(sublist_id.to_string()))
    }

    fn line(&self, sublist_id: &str, line: usize) -> Result<&Line> {
        self.lines(sublist_id)?
            .get(line)
            .ok_or_else(|| rejected(format!("Invalid line {} for sublist {}", line, sublist_id)))
    }

    fn line_mut(&mut self, sublist_id: &str, line: usize) -> Result<&mut Line> {
        self.schema.sublist(sublist_id)?;
        self.data
            .sublists
            .entry(sublist_id.to_string())
            .or_default()
            .get_mut(line)
            .ok_or_else(|| rejected(format!("Invalid line {} for sublist {}", line, sublist_id)))
    }

    fn raw_sublist(&self, sublist_id: &str, field_id: &str, line: usize) -> Result<FieldValue> {
        self.schema.sublist_field(sublist_id, field_id)?;
        Ok(self
            .line(sublist_id, line)?
            .get(field_id)
            .cloned()
            .unwrap_or_default())
    }

    fn write_field(&mut self, field_id: &str, incoming: FieldValue, by_text: bool) -> Result<()> {
        let raw = to_raw(self.schema.field(field_id)?, incoming, by_text)?;
        self.data.fields.insert(field_id.to_string(), raw);
        Ok(())
    }

    fn write_sublist(
        &mut self,
        sublist_id: &str,
        field_id: &str,
        line: usize,
        incoming: FieldValue,
        by_text: bool,
    ) -> Result<()> {
        let raw = to_raw(
            self.schema.sublist_field(sublist_id, field_id)?,
            incoming,
            by_text,
        )?;
        self.line_mut(sublist_id, line)?
            .insert(field_id.to_string(), raw);
        Ok(())
    }
}

impl Record for MemoryRecord {
    fn record_type(&self) -> &str {
        &self.data.record_type
    }

    fn id(&self) -> Option<&str> {
        self.data.id.as_deref()
    }

    fn field_ids(&self) -> Vec<String> {
        self.schema.fields.iter().map(|field| field.id.clone()).collect()
    }

    fn sublist_ids(&self) -> Vec<String> {
        self.schema
            .sublists
            .iter()
            .map(|sublist| sublist.id.clone())
            .collect()
    }

    fn sublist_field_ids(&self, sublist_id: &str) -> Result<Vec<String>> {
        Ok(self
            .schema
            .sublist(sublist_id)?
            .fields
            .iter()
            .map(|field| field.id.clone())
            .collect())
    }

    fn field_info(&self, field_id: &str) -> Result<FieldInfo> {
        self.schema.field(field_id).cloned()
    }

    fn sublist_field_info(&self, sublist_id: &str, field_id: &str) -> Result<FieldInfo> {
        self.schema.sublist_field(sublist_id, field_id).cloned()
    }

    fn text(&self, field_id: &str) -> Result<FieldValue> {
        let info = self.schema.field(field_id)?;
        Ok(render_text(info, &self.value(field_id)?))
    }

    fn value(&self, field_id: &str) -> Result<FieldValue> {
        self.schema.field(field_id)?;
        Ok(self.data.fields.get(field_id).cloned().unwrap_or_default())
    }

    fn set_text(&mut self, field_id: &str, text: FieldValue) -> Result<()> {
        self.write_field(field_id, text, true)
    }

    fn set_value(&mut self, field_id: &str, value: FieldValue) -> Result<()> {
        self.write_field(field_id, value, false)
    }

    fn sublist_text(&self, sublist_id: &str, field_id: &str, line: usize) -> Result<FieldValue> {
        let raw = self.raw_sublist(sublist_id, field_id, line)?;
        Ok(render_text(
            self.schema.sublist_field(sublist_id, field_id)?,
            &raw,
        ))
    }

    fn sublist_value(&self, sublist_id: &str, field_id: &str, line: usize) -> Result<FieldValue> {
        self.raw_sublist(sublist_id, field_id, line)
    }

    fn set_sublist_text(
        &mut self,
        sublist_id: &str,
        field_id: &str,
        line: usize,
        text: FieldValue,
    ) -> Result<()> {
        self.write_sublist(sublist_id, field_id, line, text, true)
    }

    fn set_sublist_value(
        &mut self,
        sublist_id: &str,
        field_id: &str,
        line: usize,
        value: FieldValue,
    ) -> Result<()> {
        self.write_sublist(sublist_id, field_id, line, value, false)
    }

    fn line_count(&self, sublist_id: &str) -> Result<usize> {
        Ok(self.lines(sublist_id)?.len())
    }

    fn insert_line(&mut self, sublist_id: &str, line: usize, _ignore_recalc: bool) -> Result<()> {
        self.schema.sublist(sublist_id)?;
        let lines = self.data.sublists.entry(sublist_id.to_string()).or_default();
        if line > lines.len() {
            return Err(rejected(format!(
                "Invalid line {} for sublist {}",
                line, sublist_id
            )));
        }
        lines.insert(line, Line::new());
        Ok(())
    }

    fn remove_line(&mut self, sublist_id: &str, line: usize, _ignore_recalc: bool) -> Result<()> {
        self.line(sublist_id, line)?;
        if let Some(lines) = self.data.sublists.get_mut(sublist_id) {
            lines.remove(line);
        }
        Ok(())
    }

    fn save(&mut self) -> Result<String> {
        // Existence check and insert share one guard so a concurrent delete
        // cannot be undone by a save of a stale copy.
        let mut records = self.store.records.write();
        let id = match &self.data.id {
            Some(id) => {
                let key = (self.data.record_type.clone(), id.clone());
                if !records.contains_key(&key) {
                    return Err(StoreError::RecordNotFound {
                        record_type: key.0,
                        id: key.1,
                    }
                    .into());
                }
                id.clone()
            }
            None => self.store.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
        };

        self.data.id = Some(id.clone());
        records.insert(
            (self.data.record_type.clone(), id.clone()),
            self.data.clone(),
        );
        drop(records);
        self.store.saves.fetch_add(1, Ordering::SeqCst);

        debug!(record_type = %self.data.record_type, id = %id, "Saved record");
        Ok(id)
    }
}
