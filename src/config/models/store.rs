//! Record store configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backing store for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// YAML or JSON fixture seeding the in-memory store
    #[serde(default)]
    pub fixture_path: Option<String>,
}

impl StoreConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.fixture_path.is_some() {
            self.fixture_path = other.fixture_path;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.fixture_path {
            if path.trim().is_empty() {
                return Err("Fixture path cannot be blank".to_string());
            }
        }
        Ok(())
    }
}

/// Extra record type aliases, `SYMBOLIC_NAME: storeid`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecordTypeAliases(pub BTreeMap<String, String>);

impl RecordTypeAliases {
    pub fn merge(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, id) in &self.0 {
            if name.trim().is_empty() || id.trim().is_empty() {
                return Err(format!("Record type alias '{}' -> '{}' is blank", name, id));
            }
        }
        Ok(())
    }
}
