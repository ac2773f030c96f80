use contracts::domain::a001_product::ProductRecord;
use contracts::usecases::u501_import_products::RowError;

use super::column_mapper::ColumnMapping;
use crate::shared::spreadsheet::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Строка считается пустой, если все её ячейки пусты после приведения к строке
pub fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

/// Собрать каноническую запись из строки данных
///
/// Отдельные приведения значений не падают никогда. Ошибкой всей строки
/// становится только ячейка с ошибкой табличного процессора в сопоставленной колонке.
pub fn parse_row(
    row: &[CellValue],
    mapping: &ColumnMapping,
    row_number: usize,
) -> Result<ProductRecord, RowError> {
    let mut record = ProductRecord::new_pending();

    for (field, index) in mapping.iter() {
        let cell = row.get(index).unwrap_or(&EMPTY_CELL);

        if let Some(error) = cell.as_error() {
            return Err(RowError::whole_row(
                row_number,
                format!("第{}列（{}）包含无法读取的单元格", index + 1, field),
            )
            .with_original_value(error));
        }

        field.apply(&mut record, cell);
    }

    tracing::debug!(
        "Row {}: parsed '{}' (category {:?}, sku {:?})",
        row_number,
        record.product_name,
        record.category_id,
        record.sku_id
    );
    Ok(record)
}
