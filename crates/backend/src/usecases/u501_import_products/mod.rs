pub mod aggregator;
pub mod column_mapper;
pub mod error;
pub mod executor;
pub mod format_detector;
pub mod row_parser;

#[cfg(test)]
pub(crate) mod fixtures;

pub use column_mapper::ColumnMapping;
pub use error::ImportError;
pub use executor::ImportExecutor;
pub use format_detector::{classify, missing_required_columns};
