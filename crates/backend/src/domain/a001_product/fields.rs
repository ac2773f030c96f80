//! Таблица полей канонической записи
//!
//! Каждое поле описано один раз: имя, способ приведения значения ячейки,
//! метки партнёрского формата и доступ к слоту в [`ProductRecord`].

use chrono::NaiveDate;
use contracts::domain::a001_product::ProductRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::shared::spreadsheet::cell::{self, CellValue};

/// Способ приведения значения ячейки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Название товара: пустое значение даёт пустую строку
    Name,
    Price,
    Stock,
    Integer,
    Decimal,
    Flag,
    Date,
}

/// Значение поля записи только для чтения
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    Text(Option<&'a str>),
    Name(&'a str),
    Price(Decimal),
    Stock(u32),
    Integer(Option<i32>),
    Decimal(Option<Decimal>),
    Flag(bool),
    Date(Option<NaiveDate>),
}

/// Изменяемая ссылка на поле записи
pub enum SlotMut<'a> {
    Text(&'a mut Option<String>),
    Name(&'a mut String),
    Price(&'a mut Decimal),
    Stock(&'a mut u32),
    Integer(&'a mut Option<i32>),
    Decimal(&'a mut Option<Decimal>),
    Flag(&'a mut bool),
    Date(&'a mut Option<NaiveDate>),
}

impl<'a> From<&'a Option<String>> for Slot<'a> {
    fn from(v: &'a Option<String>) -> Self {
        Slot::Text(v.as_deref())
    }
}
impl<'a> From<&'a String> for Slot<'a> {
    fn from(v: &'a String) -> Self {
        Slot::Name(v)
    }
}
impl<'a> From<&'a Decimal> for Slot<'a> {
    fn from(v: &'a Decimal) -> Self {
        Slot::Price(*v)
    }
}
impl<'a> From<&'a u32> for Slot<'a> {
    fn from(v: &'a u32) -> Self {
        Slot::Stock(*v)
    }
}
impl<'a> From<&'a Option<i32>> for Slot<'a> {
    fn from(v: &'a Option<i32>) -> Self {
        Slot::Integer(*v)
    }
}
impl<'a> From<&'a Option<Decimal>> for Slot<'a> {
    fn from(v: &'a Option<Decimal>) -> Self {
        Slot::Decimal(*v)
    }
}
impl<'a> From<&'a bool> for Slot<'a> {
    fn from(v: &'a bool) -> Self {
        Slot::Flag(*v)
    }
}
impl<'a> From<&'a Option<NaiveDate>> for Slot<'a> {
    fn from(v: &'a Option<NaiveDate>) -> Self {
        Slot::Date(*v)
    }
}

impl<'a> From<&'a mut Option<String>> for SlotMut<'a> {
    fn from(v: &'a mut Option<String>) -> Self {
        SlotMut::Text(v)
    }
}
impl<'a> From<&'a mut String> for SlotMut<'a> {
    fn from(v: &'a mut String) -> Self {
        SlotMut::Name(v)
    }
}
impl<'a> From<&'a mut Decimal> for SlotMut<'a> {
    fn from(v: &'a mut Decimal) -> Self {
        SlotMut::Price(v)
    }
}
impl<'a> From<&'a mut u32> for SlotMut<'a> {
    fn from(v: &'a mut u32) -> Self {
        SlotMut::Stock(v)
    }
}
impl<'a> From<&'a mut Option<i32>> for SlotMut<'a> {
    fn from(v: &'a mut Option<i32>) -> Self {
        SlotMut::Integer(v)
    }
}
impl<'a> From<&'a mut Option<Decimal>> for SlotMut<'a> {
    fn from(v: &'a mut Option<Decimal>) -> Self {
        SlotMut::Decimal(v)
    }
}
impl<'a> From<&'a mut bool> for SlotMut<'a> {
    fn from(v: &'a mut bool) -> Self {
        SlotMut::Flag(v)
    }
}
impl<'a> From<&'a mut Option<NaiveDate>> for SlotMut<'a> {
    fn from(v: &'a mut Option<NaiveDate>) -> Self {
        SlotMut::Date(v)
    }
}

macro_rules! product_fields {
    ($( $variant:ident => $field:ident : $kind:ident, $name:literal, [$($label:literal),*]; )*) => {
        /// Поле канонической записи (порядок объявления = канонический порядок)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ProductField {
            $($variant,)*
        }

        impl ProductField {
            pub const ALL: &'static [ProductField] = &[$(ProductField::$variant,)*];

            /// Имя поля в camelCase (как в JSON записи)
            pub fn name(&self) -> &'static str {
                match self {
                    $(ProductField::$variant => $name,)*
                }
            }

            pub fn kind(&self) -> FieldKind {
                match self {
                    $(ProductField::$variant => FieldKind::$kind,)*
                }
            }

            /// Точные метки колонок партнёрского формата
            pub fn partner_labels(&self) -> &'static [&'static str] {
                match self {
                    $(ProductField::$variant => &[$($label),*],)*
                }
            }

            pub fn slot<'a>(&self, record: &'a ProductRecord) -> Slot<'a> {
                match self {
                    $(ProductField::$variant => Slot::from(&record.$field),)*
                }
            }

            pub fn slot_mut<'a>(&self, record: &'a mut ProductRecord) -> SlotMut<'a> {
                match self {
                    $(ProductField::$variant => SlotMut::from(&mut record.$field),)*
                }
            }
        }
    };
}

product_fields! {
    // --- Идентификация ---
    SkuId => sku_id: Text, "skuId", ["sku_id", "SKU ID", "SKUID"];
    UpcEan => upc_ean: Text, "upcEan", ["条形码(upc/ean等)", "条形码", "UPC/EAN"];
    CategoryName => category_name: Text, "categoryName", ["商品类目名称", "类目名称"];
    CategoryId => category_id: Text, "categoryId", ["商品类目ID", "类目ID"];
    AppSpuCode => app_spu_code: Text, "appSpuCode", ["app_spu_code", "APP SPU编码", "APPSPU编码"];
    ProductName => product_name: Name, "productName", ["商品名称"];
    // --- Медиа ---
    ProductImage => product_image: Text, "productImage", ["商品图片", "商品图片URL"];
    CoverVideo => cover_video: Text, "coverVideo", ["封面视频", "封面视频URL"];
    SpecImage => spec_image: Text, "specImage", ["规格图"];
    SpecImageUrl => spec_image_url: Text, "specImageUrl", ["规格图URL"];
    ImageUrl => image_url: Text, "imageUrl", ["图片", "图片URL"];
    // --- Мерчандайзинг ---
    StoreCategory => store_category: Text, "storeCategory", ["店内分类"];
    StoreCategoryCount => store_category_count: Integer, "storeCategoryCount", ["所处店内分类数量"];
    SpecName => spec_name: Text, "specName", ["规格名称"];
    StoreCode => store_code: Text, "storeCode", ["店内码/货号", "店内码", "货号"];
    Price => price: Price, "price", ["价格"];
    Stock => stock: Stock, "stock", ["库存"];
    SaleStatus => sale_status: Text, "saleStatus", ["售卖状态"];
    MonthlySales => monthly_sales: Integer, "monthlySales", ["月售", "月售数量"];
    Weight => weight: Decimal, "weight", ["重量"];
    WeightUnit => weight_unit: Text, "weightUnit", ["重量单位"];
    MinPurchase => min_purchase: Integer, "minPurchase", ["起购数"];
    ShelfCode => shelf_code: Text, "shelfCode", ["货架码/位置码", "货架码", "位置码"];
    // --- Описание ---
    Description => description: Text, "description", ["商品描述", "描述"];
    SellingPoint => selling_point: Text, "sellingPoint", ["商品卖点", "卖点"];
    SellingPointPeriod => selling_point_period: Text, "sellingPointPeriod", ["卖点展示期"];
    TextDetail => text_detail: Text, "textDetail", ["文字详情"];
    ImageDetail => image_detail: Text, "imageDetail", ["图片详情"];
    BrandImageDetail => brand_image_detail: Text, "brandImageDetail", ["品牌商图片详情"];
    // --- Даты ---
    ProductionDate => production_date: Date, "productionDate", ["生产日期"];
    ExpiryDate => expiry_date: Date, "expiryDate", ["到期日期"];
    IsNearExpiry => is_near_expiry: Flag, "isNearExpiry", ["是否临期"];
    IsExpired => is_expired: Flag, "isExpired", ["是否过期"];
    // --- Доставка ---
    DeliveryMode => delivery_mode: Text, "deliveryMode", ["发货模式"];
    PresaleDeliveryTime => presale_delivery_time: Text, "presaleDeliveryTime", ["预售的可配送时间", "预售配送时间"];
    AvailableTime => available_time: Text, "availableTime", ["可售时间"];
    // --- Атрибуты ---
    ProductAttributes => product_attributes: Text, "productAttributes", ["商品属性"];
    IsRecommended => is_recommended: Flag, "isRecommended", ["力荐"];
    NoReasonReturn => no_reason_return: Flag, "noReasonReturn", ["无理由退货"];
    IsCombo => is_combo: Flag, "isCombo", ["组合商品"];
    ComboProducts => combo_products: Text, "comboProducts", ["参与的组合商品"];
    IsFourWheelDelivery => is_four_wheel_delivery: Flag, "isFourWheelDelivery", ["是否四轮配送", "四轮配送"];
    // --- Комплаенс ---
    ComplianceStatus => compliance_status: Text, "complianceStatus", ["合规状态"];
    ViolationOffline => violation_offline: Flag, "violationOffline", ["违规下架"];
    MissingRequiredInfo => missing_required_info: Flag, "missingRequiredInfo", ["必填信息缺失"];
    AuditStatus => audit_status: Text, "auditStatus", ["审核状态"];
}

impl ProductField {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Привести ячейку к типу поля и записать в запись. Никогда не падает.
    pub fn apply(&self, record: &mut ProductRecord, value: &CellValue) {
        match self.slot_mut(record) {
            SlotMut::Text(slot) => *slot = cell::to_text(value),
            SlotMut::Name(slot) => *slot = cell::to_text(value).unwrap_or_default(),
            SlotMut::Price(slot) => *slot = cell::to_price(value),
            SlotMut::Stock(slot) => *slot = cell::to_stock(value),
            SlotMut::Integer(slot) => *slot = cell::to_integer(value),
            SlotMut::Decimal(slot) => *slot = cell::to_decimal(value),
            SlotMut::Flag(slot) => *slot = cell::to_flag(value),
            SlotMut::Date(slot) => *slot = cell::to_date(value),
        }
    }

    /// Значение поля в виде ячейки для записи в таблицу
    ///
    /// Флаги пишутся как 是/否, даты как YYYY-MM-DD, отсутствующее значение как пустая ячейка.
    pub fn to_cell(&self, record: &ProductRecord) -> CellValue {
        match self.slot(record) {
            Slot::Text(value) => value.map(CellValue::from_text).unwrap_or(CellValue::Empty),
            Slot::Name(value) => CellValue::from_text(value),
            Slot::Price(value) => decimal_cell(value),
            Slot::Stock(value) => CellValue::Number(f64::from(value)),
            Slot::Integer(value) => value
                .map(|v| CellValue::Number(f64::from(v)))
                .unwrap_or(CellValue::Empty),
            Slot::Decimal(value) => value.map(decimal_cell).unwrap_or(CellValue::Empty),
            Slot::Flag(value) => CellValue::Text(if value { "是" } else { "否" }.to_string()),
            Slot::Date(value) => value
                .map(|d| CellValue::Text(d.format("%Y-%m-%d").to_string()))
                .unwrap_or(CellValue::Empty),
        }
    }
}

fn decimal_cell(value: Decimal) -> CellValue {
    match value.to_f64() {
        Some(number) => CellValue::Number(number),
        None => CellValue::Text(value.to_string()),
    }
}

impl std::fmt::Display for ProductField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_table_is_complete_and_unique() {
        assert_eq!(ProductField::ALL.len(), 46);
        let names: HashSet<_> = ProductField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), 46);

        let mut labels = HashSet::new();
        for field in ProductField::ALL {
            for label in field.partner_labels() {
                assert!(labels.insert(*label), "duplicate label {label}");
            }
        }
    }

    #[test]
    fn test_kind_matches_slot() {
        let record = ProductRecord::new_pending();
        for field in ProductField::ALL {
            let same = matches!(
                (field.kind(), field.slot(&record)),
                (FieldKind::Text, Slot::Text(_))
                    | (FieldKind::Name, Slot::Name(_))
                    | (FieldKind::Price, Slot::Price(_))
                    | (FieldKind::Stock, Slot::Stock(_))
                    | (FieldKind::Integer, Slot::Integer(_))
                    | (FieldKind::Decimal, Slot::Decimal(_))
                    | (FieldKind::Flag, Slot::Flag(_))
                    | (FieldKind::Date, Slot::Date(_))
            );
            assert!(same, "{field}");
        }
    }

    #[test]
    fn test_names_match_record_json() {
        let json = serde_json::to_value(ProductRecord::new_pending()).unwrap();
        for field in ProductField::ALL {
            assert!(json.get(field.name()).is_some(), "{field}");
        }
    }

    #[test]
    fn test_apply_coerces_by_kind() {
        let mut record = ProductRecord::new_pending();
        ProductField::Price.apply(&mut record, &CellValue::Text("8.80".to_string()));
        ProductField::Stock.apply(&mut record, &CellValue::Number(3.7));
        ProductField::IsCombo.apply(&mut record, &CellValue::Text("是".to_string()));
        ProductField::ExpiryDate.apply(&mut record, &CellValue::Text("2025/12/01".to_string()));
        ProductField::ProductName.apply(&mut record, &CellValue::Empty);
        ProductField::SkuId.apply(&mut record, &CellValue::Text("  ".to_string()));

        assert_eq!(record.price, Decimal::from_str("8.80").unwrap());
        assert_eq!(record.stock, 3);
        assert!(record.is_combo);
        assert_eq!(record.expiry_date, NaiveDate::from_ymd_opt(2025, 12, 1));
        assert_eq!(record.product_name, "");
        assert_eq!(record.sku_id, None);
        assert_eq!(ProductField::from_name("isCombo"), Some(ProductField::IsCombo));
    }

    #[test]
    fn test_to_cell() {
        let mut record = ProductRecord::new_pending();
        record.product_name = "绿茶".to_string();
        record.price = Decimal::from_str("12.5").unwrap();
        record.is_expired = true;
        record.production_date = NaiveDate::from_ymd_opt(2024, 1, 9);

        assert_eq!(
            ProductField::ProductName.to_cell(&record),
            CellValue::Text("绿茶".to_string())
        );
        assert_eq!(ProductField::Price.to_cell(&record), CellValue::Number(12.5));
        assert_eq!(ProductField::Stock.to_cell(&record), CellValue::Number(0.0));
        assert_eq!(ProductField::IsExpired.to_cell(&record), CellValue::Text("是".to_string()));
        assert_eq!(ProductField::IsCombo.to_cell(&record), CellValue::Text("否".to_string()));
        assert_eq!(
            ProductField::ProductionDate.to_cell(&record),
            CellValue::Text("2024-01-09".to_string())
        );
        assert_eq!(ProductField::Weight.to_cell(&record), CellValue::Empty);
        assert_eq!(ProductField::SkuId.to_cell(&record), CellValue::Empty);
    }
}
