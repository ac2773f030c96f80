pub mod aggregate;

pub use aggregate::{TemplateId, TemplateMetadata};
