pub mod repository;

pub use repository::{InMemoryTemplateRegistry, JsonFileTemplateRegistry, TemplateRegistry};
