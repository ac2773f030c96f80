pub mod request;
pub mod response;

pub use request::{ImportMode, ImportRequest};
pub use response::{ImportOutcome, RowError, WHOLE_ROW};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportProducts;

impl UseCaseMetadata for ImportProducts {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_products"
    }

    fn display_name() -> &'static str {
        "Импорт товаров из таблицы"
    }
}
