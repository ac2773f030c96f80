pub mod config;
pub mod spreadsheet;
pub mod storage;
pub mod template_schema;
