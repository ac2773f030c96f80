/// Идентификация UseCase в логах и ответах CLI
pub trait UseCaseMetadata {
    /// Номер, например "u501"
    fn usecase_index() -> &'static str;

    fn usecase_name() -> &'static str;

    fn display_name() -> &'static str;

    /// Полное имя вида "u501_import_products"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// Префикс строк лога: "[u501_import_products]"
    fn log_prefix() -> String {
        format!("[{}]", Self::full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_import_products::ImportProducts;
    use crate::usecases::u502_generate_from_template::GenerateFromTemplate;

    #[test]
    fn test_full_names() {
        assert_eq!(ImportProducts::full_name(), "u501_import_products");
        assert_eq!(GenerateFromTemplate::log_prefix(), "[u502_generate_from_template]");
    }
}
