use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::FormatType;

crate::uuid_aggregate_id!(
    /// Идентификатор загруженного шаблона
    TemplateId
);

/// Метаданные шаблона, загруженного мерчантом
///
/// Сами байты лежат в бинарном хранилище по `storage_locator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    pub id: TemplateId,
    pub merchant_id: i64,
    /// Исходное имя файла
    pub name: String,
    pub template_type: FormatType,
    pub storage_locator: String,
    /// Размер в байтах
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

impl TemplateMetadata {
    pub fn new(
        merchant_id: i64,
        name: impl Into<String>,
        template_type: FormatType,
        storage_locator: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            id: TemplateId::new_v4(),
            merchant_id,
            name: name.into(),
            template_type,
            storage_locator: storage_locator.into(),
            size,
            created_at: Utc::now(),
        }
    }
}
