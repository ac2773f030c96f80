use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::FormatType;

/// Сгенерированный и сохранённый файл
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    pub locator: String,
    pub file_name: String,
    pub size: u64,
    pub record_count: usize,
}

/// Есть ли у мерчанта загруженный шаблон
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStatus {
    pub has_template: bool,
    pub template_name: Option<String>,
    pub upload_time: Option<DateTime<Utc>>,
    pub file_size: Option<u64>,
    pub template_type: Option<FormatType>,
}

impl TemplateStatus {
    pub fn absent() -> Self {
        Self {
            has_template: false,
            template_name: None,
            upload_time: None,
            file_size: None,
            template_type: None,
        }
    }
}

/// Структура шаблона: заголовки и то, во что они превратятся при заполнении
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub headers: Vec<String>,
    pub column_count: usize,
    /// Строки ниже заголовка (включая служебные)
    pub data_row_count: usize,
    /// Для каждого заголовка: имя канонического поля или None
    pub mapped_fields: Vec<Option<String>>,
}
