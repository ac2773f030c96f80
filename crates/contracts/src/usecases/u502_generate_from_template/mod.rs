pub mod request;
pub mod response;

pub use request::GenerateRequest;
pub use response::{GeneratedFile, TemplatePreview, TemplateStatus};

use crate::usecases::common::UseCaseMetadata;

pub struct GenerateFromTemplate;

impl UseCaseMetadata for GenerateFromTemplate {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "generate_from_template"
    }

    fn display_name() -> &'static str {
        "Генерация таблицы по шаблону мерчанта"
    }
}
