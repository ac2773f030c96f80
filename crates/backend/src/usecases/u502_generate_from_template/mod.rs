pub mod blank_template;
pub mod error;
pub mod executor;
pub mod header_rules;
pub mod template_writer;

pub use error::TemplateError;
pub use executor::GenerateExecutor;
pub use template_writer::{fill_template, preview_template};
