use serde::{Deserialize, Serialize};

/// Форма загруженной таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatType {
    /// Родной формат партнёрской платформы (50+ колонок)
    Partner,
    /// Упрощённый формат из 6 колонок
    Standard,
    /// Не распознан; разбирается как `Standard`
    Unknown,
}

impl FormatType {
    /// Получить код формата
    pub fn code(&self) -> &'static str {
        match self {
            FormatType::Partner => "PARTNER",
            FormatType::Standard => "STANDARD",
            FormatType::Unknown => "UNKNOWN",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            FormatType::Partner => "平台格式",
            FormatType::Standard => "标准格式",
            FormatType::Unknown => "未知格式",
        }
    }

    /// Получить все форматы
    pub fn all() -> Vec<FormatType> {
        vec![FormatType::Partner, FormatType::Standard, FormatType::Unknown]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PARTNER" => Some(FormatType::Partner),
            "STANDARD" => Some(FormatType::Standard),
            "UNKNOWN" => Some(FormatType::Unknown),
            _ => None,
        }
    }

    /// Формат, стратегией которого реально разбираются строки
    pub fn parsing_strategy(&self) -> FormatType {
        match self {
            FormatType::Partner => FormatType::Partner,
            FormatType::Standard | FormatType::Unknown => FormatType::Standard,
        }
    }

    /// Сколько строк над данными (заголовок + строка описаний у партнёрского формата)
    pub fn data_row_offset(&self) -> usize {
        match self.parsing_strategy() {
            FormatType::Partner => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
