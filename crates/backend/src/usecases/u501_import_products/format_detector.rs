use contracts::enums::FormatType;

use crate::shared::spreadsheet::normalize;

/// Обязательные колонки партнёрского формата
pub const PARTNER_REQUIRED_COLUMNS: [&str; 3] = ["商品类目ID", "商品名称", "价格"];

/// Обязательные колонки стандартного формата
pub const STANDARD_REQUIRED_COLUMNS: [&str; 3] = ["商品名称*", "类目ID*", "价格(元)*"];

fn contains_column(headers: &[String], column: &str) -> bool {
    let target = normalize(column);
    headers.iter().any(|h| normalize(h) == target)
}

fn has_all(headers: &[String], required: &[&str]) -> bool {
    required.iter().all(|column| contains_column(headers, column))
}

/// Определить формат таблицы по строке заголовков
///
/// Партнёрский формат проверяется первым и выигрывает, если подходят оба.
pub fn classify(headers: &[String]) -> FormatType {
    if headers.iter().all(|h| normalize(h).is_empty()) {
        tracing::warn!("Header row is empty, format cannot be detected");
        return FormatType::Unknown;
    }

    if has_all(headers, &PARTNER_REQUIRED_COLUMNS) {
        tracing::info!("Detected PARTNER format");
        return FormatType::Partner;
    }

    if has_all(headers, &STANDARD_REQUIRED_COLUMNS) {
        tracing::info!("Detected STANDARD format");
        return FormatType::Standard;
    }

    tracing::warn!("Format not recognized, falling back to the standard layout");
    tracing::warn!("PARTNER requires: {}", PARTNER_REQUIRED_COLUMNS.join(", "));
    tracing::warn!("STANDARD requires: {}", STANDARD_REQUIRED_COLUMNS.join(", "));
    FormatType::Unknown
}

/// Обязательные колонки, отсутствующие в заголовке
///
/// Для `Unknown` сообщается, чего не хватило до стандартного формата.
pub fn missing_required_columns(headers: &[String], format: FormatType) -> Vec<String> {
    let required: &[&str] = match format {
        FormatType::Partner => &PARTNER_REQUIRED_COLUMNS,
        FormatType::Standard | FormatType::Unknown => &STANDARD_REQUIRED_COLUMNS,
    };

    required
        .iter()
        .filter(|column| !contains_column(headers, column))
        .map(|column| column.to_string())
        .collect()
}
