//! Record store fixtures
//!
//! Every factory builds a fresh store from `fixtures/records.yaml`, so tests
//! never observe each other's writes.

use recordops::core::commands::CommandContext;
use recordops::core::record::{Fixture, MemoryRecordStore, RecordTypeTable};
use std::sync::Arc;

/// The bundled fixture: customers 123 and 124, sales order 500
pub const RECORDS_YAML: &str = include_str!("../../fixtures/records.yaml");

pub struct StoreFactory;

impl StoreFactory {
    pub fn seeded() -> MemoryRecordStore {
        Fixture::parse(RECORDS_YAML)
            .and_then(Fixture::into_store)
            .expect("bundled fixture must load")
    }

    /// Command context over a fresh seeded store, plus a handle on that store
    pub fn context() -> (CommandContext, MemoryRecordStore) {
        let store = Self::seeded();
        let context = CommandContext::new(Arc::new(store.clone()), RecordTypeTable::standard());
        (context, store)
    }
}

pub fn tasks(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}
