//! Seed documents for the in-memory store
//!
//! ```yaml
//! record_types:
//!   customer:
//!     fields:
//!       - { id: firstname, label: First Name }
//!       - { id: category, kind: select, options: [{ id: "1", text: Retail }] }
//!     sublists:
//!       - id: addressbook
//!         fields: [{ id: label }]
//! records:
//!   - type: customer
//!     id: "123"
//!     fields: { firstname: John, category: 1 }
//!     sublists:
//!       addressbook: [{ label: Home }]
//! ```
//!
//! JSON documents are accepted as well.

use super::memory::{MemoryRecordStore, RecordSchema, RecordSeed};
use crate::utils::error::{RecordOpsError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Parsed fixture document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub record_types: BTreeMap<String, RecordSchema>,
    #[serde(default)]
    pub records: Vec<RecordSeed>,
}

impl Fixture {
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| RecordOpsError::config(format!("Failed to parse fixture: {}", e)))
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            RecordOpsError::config(format!("Failed to read fixture {:?}: {}", path, e))
        })?;
        Self::parse(&content)
    }

    /// Build a store holding every type and record of the document
    pub fn into_store(self) -> Result<MemoryRecordStore> {
        let store = MemoryRecordStore::new();
        for (record_type, schema) in self.record_types {
            store.define_type(record_type, schema);
        }

        let count = self.records.len();
        for seed in self.records {
            let label = format!("{} {}", seed.record_type, seed.id);
            store
                .seed(seed)
                .map_err(|e| RecordOpsError::config(format!("Invalid fixture record {}: {}", label, e)))?;
        }

        info!(
            record_types = store.record_types().len(),
            records = count,
            "Loaded record fixture"
        );
        Ok(store)
    }
}
