pub mod fields;
pub mod repository;

pub use fields::{FieldKind, ProductField, Slot};
pub use repository::{InMemoryRecordRepository, JsonFileRecordRepository, RecordRepository};
