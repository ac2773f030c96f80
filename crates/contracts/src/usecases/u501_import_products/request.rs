use serde::{Deserialize, Serialize};

/// Режим импорта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Всегда возвращает результат, даже если часть строк не разобрана
    #[default]
    Preview,
    /// Всё или ничего: любая ошибка строки отклоняет весь пакет
    Commit,
}

/// Запрос на импорт таблицы
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub merchant_id: i64,
    /// Имя загруженного файла (для проверки расширения и логов)
    pub file_name: String,
    #[serde(default)]
    pub mode: ImportMode,
}
