pub mod format_type;

pub use format_type::FormatType;
