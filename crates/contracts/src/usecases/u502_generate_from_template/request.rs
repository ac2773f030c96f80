use serde::{Deserialize, Serialize};

use crate::domain::a001_product::ProductRecord;

/// Запрос на генерацию файла по последнему шаблону мерчанта
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub merchant_id: i64,
    pub records: Vec<ProductRecord>,
}
