//! Records, their store and the record type table

mod fixture;
mod memory;
mod record_types;
mod store;
mod types;

pub use fixture::Fixture;
pub use memory::{MemoryRecord, MemoryRecordStore, RecordSchema, RecordSeed, SublistSchema};
pub use record_types::{RecordTypeTable, UNDOCUMENTED_TYPES};
pub use store::{Record, RecordStore};
pub use types::{FieldInfo, FieldKind, FieldValue, SelectOption};
