//! Правила сопоставления заголовков шаблона с полями записи
//!
//! Шаблоны мерчантов подписывают колонки как угодно, поэтому здесь не
//! точные метки, а ключевые слова. Порядок важен: более узкие правила
//! стоят раньше общих (например, 类目名称 раньше 类目, 规格图URL раньше 规格图).

use crate::domain::a001_product::ProductField as F;
use crate::shared::spreadsheet::header::{first_match, KeywordRule};

type Rule = KeywordRule<F>;

const TEMPLATE_RULES: &[Rule] = &[
    // Идентификация
    Rule::any(F::SkuId, &["sku"]),
    Rule::any(F::UpcEan, &["条形码", "upc", "ean"]),
    Rule::any(F::CategoryName, &["类目名称"]),
    Rule::any(F::CategoryId, &["类目", "分类", "categoryid", "category_id", "category"])
        .none(&["店内"]),
    Rule::any(F::AppSpuCode, &[]).all(&["app", "spu"]),
    Rule::any(F::ProductName, &["名称"])
        .none(&["类目", "规格"])
        .exact(&["product_name", "productname", "name"]),
    // Медиа
    Rule::any(F::BrandImageDetail, &["品牌商图片详情"]),
    Rule::any(F::ImageDetail, &["图片详情"]),
    Rule::any(F::SpecImageUrl, &[]).all(&["规格图", "url"]),
    Rule::any(F::SpecImage, &["规格图"]),
    Rule::any(F::ProductImage, &["商品图片"]),
    Rule::any(F::ImageUrl, &["图片"]).none(&["规格"]),
    Rule::any(F::CoverVideo, &["封面视频"]),
    // Мерчандайзинг
    Rule::any(F::StoreCategoryCount, &["店内分类数量"]),
    Rule::any(F::StoreCategory, &["店内分类"]),
    Rule::any(F::SpecName, &["规格名称"]),
    Rule::any(F::StoreCode, &["店内码", "货号"]),
    Rule::any(F::Price, &["价格"]).exact(&["price"]),
    Rule::any(F::Stock, &["库存"]).exact(&["stock"]),
    Rule::any(F::SaleStatus, &["售卖状态", "销售状态"]),
    Rule::any(F::MonthlySales, &["月售"]),
    Rule::any(F::WeightUnit, &["重量单位"]),
    Rule::any(F::Weight, &["重量"]).exact(&["weight"]),
    Rule::any(F::MinPurchase, &["起购数"]),
    Rule::any(F::ShelfCode, &["货架码", "位置码"]),
    // Описание
    Rule::any(F::SellingPointPeriod, &["卖点展示期"]),
    Rule::any(F::SellingPoint, &["卖点"]),
    Rule::any(F::TextDetail, &["文字详情", "详情"]).none(&["图片"]),
    // Даты
    Rule::any(F::ProductionDate, &["生产日期"]),
    Rule::any(F::ExpiryDate, &["到期日期"]),
    Rule::any(F::IsNearExpiry, &["是否临期"]),
    Rule::any(F::IsExpired, &["是否过期"]),
    // Доставка
    Rule::any(F::DeliveryMode, &["发货模式"]),
    Rule::any(F::PresaleDeliveryTime, &["预售配送时间", "预售的可配送时间"]),
    Rule::any(F::AvailableTime, &["可售时间"]),
    // Атрибуты
    Rule::any(F::ProductAttributes, &["商品属性"]),
    Rule::any(F::IsRecommended, &["力荐"]),
    Rule::any(F::NoReasonReturn, &["无理由退货"]),
    Rule::any(F::ComboProducts, &["参与的组合商品"]),
    Rule::any(F::IsCombo, &["组合商品"]),
    Rule::any(F::IsFourWheelDelivery, &["四轮配送"]),
    // Комплаенс
    Rule::any(F::ComplianceStatus, &["合规状态"]),
    Rule::any(F::ViolationOffline, &["违规下架"]),
    Rule::any(F::MissingRequiredInfo, &["必填信息缺失"]),
    Rule::any(F::AuditStatus, &["审核状态"]),
    // Общие слова в самом конце
    Rule::any(F::Description, &["描述", "说明"]).exact(&["description"]),
    Rule::any(F::ImageUrl, &["url", "image"]),
];

/// Поле записи для заголовка колонки шаблона
pub fn resolve_field(header: &str) -> Option<F> {
    first_match(TEMPLATE_RULES, header)
}

/// Поля для всех колонок заголовка (None: колонка остаётся пустой)
pub fn resolve_columns(headers: &[String]) -> Vec<Option<F>> {
    headers
        .iter()
        .map(|header| {
            let field = resolve_field(header);
            tracing::debug!(
                "Template column '{}' -> {}",
                header,
                field.map(|f| f.name()).unwrap_or("-")
            );
            field
        })
        .collect()
}
