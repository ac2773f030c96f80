use contracts::enums::FormatType;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

use crate::domain::a001_product::ProductField;
use crate::shared::spreadsheet::header::{first_match, KeywordRule};
use crate::shared::spreadsheet::normalize;

/// Поле → индекс колонки (с 0) для одного документа
///
/// Строится один раз и дальше не меняется.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<ProductField, usize>,
}

impl ColumnMapping {
    pub fn get(&self, field: ProductField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Пары в каноническом порядке полей
    pub fn iter(&self) -> impl Iterator<Item = (ProductField, usize)> + '_ {
        self.columns.iter().map(|(field, index)| (*field, *index))
    }
}

impl std::fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, index)| format!("{}={}", field, index))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

// ============================================================================
// Partner layout: exact labels
// ============================================================================

/// Нормализованная метка → поле
static PARTNER_DICTIONARY: Lazy<HashMap<String, ProductField>> = Lazy::new(|| {
    let mut dictionary = HashMap::new();
    for field in ProductField::ALL {
        for label in field.partner_labels() {
            dictionary.entry(normalize(label)).or_insert(*field);
        }
    }
    dictionary
});

/// Сопоставление колонок партнёрского формата
///
/// Незнакомые заголовки пропускаются. Если поле встречается дважды,
/// остаётся самая правая колонка.
pub fn map_partner_columns(headers: &[String]) -> ColumnMapping {
    let mut columns = BTreeMap::new();

    for (index, header) in headers.iter().enumerate() {
        let key = normalize(header);
        if key.is_empty() {
            continue;
        }
        if let Some(field) = PARTNER_DICTIONARY.get(&key) {
            tracing::debug!("Mapped column '{}' -> {} (index {})", header, field, index);
            if let Some(previous) = columns.insert(*field, index) {
                tracing::debug!("{} moved from column {} to {}", field, previous, index);
            }
        }
    }

    tracing::info!("Partner column mapping done: {} fields", columns.len());
    ColumnMapping { columns }
}

// ============================================================================
// Standard layout: keyword families with positional defaults
// ============================================================================

/// Семейства ключевых слов в порядке приоритета
const STANDARD_RULES: [KeywordRule<ProductField>; 6] = [
    KeywordRule::any(
        ProductField::ProductName,
        &["商品名称", "名称", "productname", "product_name"],
    ),
    KeywordRule::any(
        ProductField::CategoryId,
        &["类目", "分类", "category", "categoryid"],
    ),
    KeywordRule::any(ProductField::Price, &["价格", "price"]),
    KeywordRule::any(ProductField::Stock, &["库存", "stock"]),
    KeywordRule::any(ProductField::Description, &["描述", "说明", "description"]),
    KeywordRule::any(ProductField::ImageUrl, &["图片", "url", "image"]),
];

/// Позиция по умолчанию для каждого поля стандартного формата
const STANDARD_DEFAULTS: [(ProductField, usize); 6] = [
    (ProductField::ProductName, 0),
    (ProductField::CategoryId, 1),
    (ProductField::Price, 2),
    (ProductField::Stock, 3),
    (ProductField::Description, 4),
    (ProductField::ImageUrl, 5),
];

/// Сопоставление колонок стандартного формата
///
/// Результат всегда содержит ровно шесть полей: что не нашлось по
/// ключевым словам, берётся по позиции.
pub fn map_standard_columns(headers: &[String]) -> ColumnMapping {
    let mut columns = BTreeMap::new();

    for (index, header) in headers.iter().enumerate() {
        if let Some(field) = first_match(&STANDARD_RULES, header) {
            if !columns.contains_key(&field) {
                tracing::debug!("Mapped column '{}' -> {} (index {})", header, field, index);
                columns.insert(field, index);
            }
        }
    }

    for (field, position) in STANDARD_DEFAULTS {
        columns.entry(field).or_insert_with(|| {
            tracing::debug!("{} not found in header, using column {}", field, position);
            position
        });
    }

    ColumnMapping { columns }
}

/// Сопоставление по стратегии формата (`Unknown` разбирается как стандартный)
pub fn map_columns(headers: &[String], format: FormatType) -> ColumnMapping {
    match format.parsing_strategy() {
        FormatType::Partner => map_partner_columns(headers),
        _ => map_standard_columns(headers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partner_mapping_by_exact_label() {
        let h = headers(&[
            "SKU ID",
            "商品名称",
            "未知列",
            "价 格",
            "条形码(upc/ean等)",
            "商品类目ID",
            "图片",
            "是否四轮配送",
        ]);
        let mapping = map_partner_columns(&h);

        assert_eq!(mapping.get(ProductField::SkuId), Some(0));
        assert_eq!(mapping.get(ProductField::ProductName), Some(1));
        assert_eq!(mapping.get(ProductField::Price), Some(3));
        assert_eq!(mapping.get(ProductField::UpcEan), Some(4));
        assert_eq!(mapping.get(ProductField::CategoryId), Some(5));
        assert_eq!(mapping.get(ProductField::ImageUrl), Some(6));
        assert_eq!(mapping.get(ProductField::IsFourWheelDelivery), Some(7));
        assert_eq!(mapping.len(), 7);
    }

    #[test]
    fn test_partner_duplicate_keeps_rightmost() {
        let mapping = map_partner_columns(&headers(&["店内码", "货号"]));
        assert_eq!(mapping.get(ProductField::StoreCode), Some(1));
        assert_eq!(mapping.len(), 1);

        let mapping = map_partner_columns(&headers(&["商品名称", "价格", "商品名称"]));
        assert_eq!(mapping.get(ProductField::ProductName), Some(2));
        assert_eq!(mapping.get(ProductField::Price), Some(1));
    }

    #[test]
    fn test_every_partner_label_resolves_to_its_field() {
        for field in ProductField::ALL {
            for label in field.partner_labels() {
                let mapping = map_partner_columns(&headers(&[label]));
                assert_eq!(mapping.get(*field), Some(0), "{label}");
            }
        }
    }

    #[test]
    fn test_standard_mapping_with_reordered_headers() {
        let h = headers(&["价格(元)*", "图片URL", "商品名称*", "库存", "类目ID*", "商品描述"]);
        let mapping = map_standard_columns(&h);

        assert_eq!(mapping.get(ProductField::Price), Some(0));
        assert_eq!(mapping.get(ProductField::ImageUrl), Some(1));
        assert_eq!(mapping.get(ProductField::ProductName), Some(2));
        assert_eq!(mapping.get(ProductField::Stock), Some(3));
        assert_eq!(mapping.get(ProductField::CategoryId), Some(4));
        assert_eq!(mapping.get(ProductField::Description), Some(5));
    }

    #[test]
    fn test_standard_priority_and_first_header_wins() {
        // 类目名称 попадает в семейство названия раньше, чем в семейство категории
        let h = headers(&["类目名称", "Product Name", "Category"]);
        let mapping = map_standard_columns(&h);
        assert_eq!(mapping.get(ProductField::ProductName), Some(0));
        assert_eq!(mapping.get(ProductField::CategoryId), Some(2));
    }

    #[test]
    fn test_standard_defaults_are_total() {
        let mapping = map_standard_columns(&[]);
        assert_eq!(mapping.len(), 6);
        assert_eq!(mapping.get(ProductField::ProductName), Some(0));
        assert_eq!(mapping.get(ProductField::ImageUrl), Some(5));

        let mapping = map_standard_columns(&headers(&["x", "y", "price"]));
        assert_eq!(mapping.get(ProductField::Price), Some(2));
        assert_eq!(mapping.get(ProductField::CategoryId), Some(1));
        assert_eq!(mapping.len(), 6);
    }

    #[test]
    fn test_unknown_uses_standard_strategy() {
        let mapping = map_columns(&headers(&["foo"]), FormatType::Unknown);
        assert_eq!(mapping.len(), 6);
    }
}
