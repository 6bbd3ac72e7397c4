//! Reading and writing fields addressed by a path

mod access;
mod lookup;
mod write;

pub use access::{BodyField, FieldAccess, FieldAddress, SublistField};
pub use lookup::{lookup_field, lookup_fields};
pub use write::{Selector, WriteReceipt, write_field};
