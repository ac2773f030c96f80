pub mod aggregate;

pub use aggregate::{ProductRecord, ProductRecordId, RecordStatus};
