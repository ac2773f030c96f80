use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор канонической записи товара
    ProductRecordId
);

// ============================================================================
// Lifecycle
// ============================================================================

/// Статус жизненного цикла записи
///
/// Движок создаёт записи только в статусе `Pending`; переходы в
/// `Uploaded`/`Failed` выполняют внешние процессы выгрузки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    #[default]
    Pending,
    Uploaded,
    Failed,
}

impl RecordStatus {
    /// Числовой код статуса (как хранится во внешнем репозитории)
    pub fn code(&self) -> i32 {
        match self {
            RecordStatus::Pending => 0,
            RecordStatus::Uploaded => 1,
            RecordStatus::Failed => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "待上传",
            RecordStatus::Uploaded => "已上传",
            RecordStatus::Failed => "上传失败",
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(RecordStatus::Pending),
            1 => Some(RecordStatus::Uploaded),
            2 => Some(RecordStatus::Failed),
            _ => None,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Каноническая запись товара
///
/// Единая схема, к которой сводятся и стандартная (6 колонок), и партнёрская
/// (50+ колонок) таблицы. `price` и `stock` не бывают пустыми, флаги всегда 0/1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductRecordId,

    // --- Идентификация ---
    pub sku_id: Option<String>,
    /// Штрихкод (UPC/EAN)
    pub upc_ean: Option<String>,
    pub category_name: Option<String>,
    pub category_id: Option<String>,
    /// Код SPU, присвоенный партнёрской платформой
    pub app_spu_code: Option<String>,
    pub product_name: String,

    // --- Медиа ---
    pub product_image: Option<String>,
    pub cover_video: Option<String>,
    pub spec_image: Option<String>,
    pub spec_image_url: Option<String>,
    pub image_url: Option<String>,

    // --- Мерчандайзинг ---
    pub store_category: Option<String>,
    pub store_category_count: Option<i32>,
    pub spec_name: Option<String>,
    pub store_code: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    pub sale_status: Option<String>,
    pub monthly_sales: Option<i32>,
    pub weight: Option<Decimal>,
    pub weight_unit: Option<String>,
    pub min_purchase: Option<i32>,
    pub shelf_code: Option<String>,

    // --- Описание ---
    pub description: Option<String>,
    pub selling_point: Option<String>,
    pub selling_point_period: Option<String>,
    pub text_detail: Option<String>,
    pub image_detail: Option<String>,
    pub brand_image_detail: Option<String>,

    // --- Даты ---
    pub production_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, with = "int_flag")]
    pub is_near_expiry: bool,
    #[serde(default, with = "int_flag")]
    pub is_expired: bool,

    // --- Доставка ---
    pub delivery_mode: Option<String>,
    pub presale_delivery_time: Option<String>,
    pub available_time: Option<String>,

    // --- Атрибуты ---
    pub product_attributes: Option<String>,
    #[serde(default, with = "int_flag")]
    pub is_recommended: bool,
    #[serde(default, with = "int_flag")]
    pub no_reason_return: bool,
    #[serde(default, with = "int_flag")]
    pub is_combo: bool,
    pub combo_products: Option<String>,
    #[serde(default, with = "int_flag")]
    pub is_four_wheel_delivery: bool,

    // --- Комплаенс ---
    pub compliance_status: Option<String>,
    #[serde(default, with = "int_flag")]
    pub violation_offline: bool,
    #[serde(default, with = "int_flag")]
    pub missing_required_info: bool,
    pub audit_status: Option<String>,

    // --- Системные ---
    #[serde(default)]
    pub status: RecordStatus,
}

impl ProductRecord {
    /// Пустая запись в статусе `Pending` (цена 0, остаток 0, все флаги 0)
    pub fn new_pending() -> Self {
        Self {
            id: ProductRecordId::new_v4(),
            sku_id: None,
            upc_ean: None,
            category_name: None,
            category_id: None,
            app_spu_code: None,
            product_name: String::new(),
            product_image: None,
            cover_video: None,
            spec_image: None,
            spec_image_url: None,
            image_url: None,
            store_category: None,
            store_category_count: None,
            spec_name: None,
            store_code: None,
            price: Decimal::ZERO,
            stock: 0,
            sale_status: None,
            monthly_sales: None,
            weight: None,
            weight_unit: None,
            min_purchase: None,
            shelf_code: None,
            description: None,
            selling_point: None,
            selling_point_period: None,
            text_detail: None,
            image_detail: None,
            brand_image_detail: None,
            production_date: None,
            expiry_date: None,
            is_near_expiry: false,
            is_expired: false,
            delivery_mode: None,
            presale_delivery_time: None,
            available_time: None,
            product_attributes: None,
            is_recommended: false,
            no_reason_return: false,
            is_combo: false,
            combo_products: None,
            is_four_wheel_delivery: false,
            compliance_status: None,
            violation_offline: false,
            missing_required_info: false,
            audit_status: None,
            status: RecordStatus::Pending,
        }
    }
}

/// Флаги хранятся как bool, а наружу уходят как 0/1
mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Bool(bool),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(v) => v == 1,
            Raw::Bool(v) => v,
        })
    }
}
