use contracts::domain::a001_product::ProductRecord;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use super::error::TemplateError;
use crate::domain::a001_product::ProductField;
use crate::shared::spreadsheet::writer::write_cell;
use crate::shared::template_schema::TemplateSchema;

/// Заголовки стандартного шаблона импорта
pub const STANDARD_HEADERS: [&str; 6] = ["商品名称*", "类目ID*", "价格(元)*", "库存", "商品描述", "图片URL"];

const STANDARD_FIELDS: [ProductField; 6] = [
    ProductField::ProductName,
    ProductField::CategoryId,
    ProductField::Price,
    ProductField::Stock,
    ProductField::Description,
    ProductField::ImageUrl,
];

const STANDARD_WIDTHS: [f64; 6] = [30.0, 15.0, 15.0, 15.0, 30.0, 40.0];

pub const STANDARD_NOTE: &str = "说明：带*号的字段为必填项，类目ID必须是10位数字";

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_size(12)
        .set_background_color(Color::RGB(0xD9D9D9))
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn write_headers<'a>(
    worksheet: &mut Worksheet,
    headers: impl IntoIterator<Item = &'a str>,
) -> Result<(), XlsxError> {
    let format = header_format();
    for (col, header) in headers.into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &format)?;
    }
    Ok(())
}

fn write_records(
    worksheet: &mut Worksheet,
    first_row: u32,
    fields: &[ProductField],
    records: &[ProductRecord],
) -> Result<(), XlsxError> {
    for (offset, record) in records.iter().enumerate() {
        for (col, field) in fields.iter().enumerate() {
            write_cell(worksheet, first_row + offset as u32, col, &field.to_cell(record))?;
        }
    }
    Ok(())
}

fn sample_records() -> Vec<ProductRecord> {
    let samples: [(&str, i64, u32, &str, &str); 2] = [
        ("苹果 iPhone 15 Pro", 7999, 100, "全新苹果iPhone 15 Pro 256GB 深空黑色", "iphone15"),
        ("华为 Mate 60 Pro", 6999, 80, "华为Mate 60 Pro 12GB+512GB 雅川青", "mate60"),
    ];
    samples
        .iter()
        .map(|(name, price, stock, description, image)| {
            let mut record = ProductRecord::new_pending();
            record.product_name = name.to_string();
            record.category_id = Some("2000010001".to_string());
            record.price = Decimal::from(*price);
            record.stock = *stock;
            record.description = Some(description.to_string());
            record.image_url = Some(format!("https://example.com/{}.jpg", image));
            record
        })
        .collect()
}

/// Стандартный шаблон импорта: 6 колонок, примеры и строка-пояснение
pub fn standard_import_template() -> Result<Vec<u8>, TemplateError> {
    let samples = sample_records();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("商品导入")?;

    write_headers(worksheet, STANDARD_HEADERS)?;
    for (col, width) in STANDARD_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    write_records(worksheet, 1, &STANDARD_FIELDS, &samples)?;

    let note_row = samples.len() as u32 + 2;
    let note_format = Format::new().set_font_color(Color::Red).set_italic();
    worksheet.merge_range(note_row, 0, note_row, 5, STANDARD_NOTE, &note_format)?;

    tracing::info!("Generated standard import template");
    Ok(workbook.save_to_buffer()?)
}

/// Партнёрский шаблон по статической схеме
///
/// Строка 0 заголовки, строка 1 пояснения к колонкам, записи со строки 2.
pub fn schema_template(
    schema: &TemplateSchema,
    records: &[ProductRecord],
) -> Result<Vec<u8>, TemplateError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&schema.template_name)?;

    let (columns, fields): (Vec<_>, Vec<_>) = schema.fields().unzip();
    write_headers(worksheet, columns.iter().map(|c| c.header_name.as_str()))?;
    for (col, column) in columns.iter().enumerate() {
        worksheet.set_column_width(col as u16, 20)?;
        worksheet.write_string(1, col as u16, &column.hint())?;
    }
    write_records(worksheet, 2, &fields, records)?;

    tracing::info!(
        "Generated '{}' template: {} columns, {} records",
        schema.template_name,
        columns.len(),
        records.len()
    );
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ImportConfig;
    use crate::shared::spreadsheet::{read_first_sheet, CellValue};
    use crate::shared::template_schema;
    use crate::usecases::u501_import_products::ImportExecutor;
    use contracts::enums::FormatType;
    use contracts::usecases::u501_import_products::ImportMode;

    #[test]
    fn test_standard_template_layout() {
        let bytes = standard_import_template().unwrap();
        let grid = read_first_sheet(&bytes).unwrap();

        assert_eq!(grid.name, "商品导入");
        assert_eq!(grid.header_texts().unwrap(), STANDARD_HEADERS.to_vec());
        assert_eq!(grid.row(1).unwrap()[2], CellValue::Number(7999.0));
        assert_eq!(grid.row(4).unwrap()[0], CellValue::Text(STANDARD_NOTE.to_string()));
    }

    #[test]
    fn test_standard_template_imports_back() {
        let bytes = standard_import_template().unwrap();
        let outcome = ImportExecutor::new(ImportConfig::default())
            .import_document(&bytes, ImportMode::Preview)
            .unwrap();

        assert_eq!(outcome.format_type, FormatType::Standard);
        assert_eq!(outcome.records[0].product_name, "苹果 iPhone 15 Pro");
        assert_eq!(outcome.records[1].stock, 80);
    }

    #[test]
    fn test_schema_template_imports_back_as_partner() {
        let schema = template_schema::get().unwrap();
        let mut record = ProductRecord::new_pending();
        record.product_name = "燕麦".to_string();
        record.category_id = Some("3000010001".to_string());
        record.price = Decimal::new(1590, 2);
        record.is_recommended = true;

        let bytes = schema_template(schema, &[record]).unwrap();
        let outcome = ImportExecutor::new(ImportConfig::default())
            .import_document(&bytes, ImportMode::Preview)
            .unwrap();

        assert_eq!(outcome.format_type, FormatType::Partner);
        assert_eq!(outcome.success_count, 1);
        let imported = &outcome.records[0];
        assert_eq!(imported.product_name, "燕麦");
        assert_eq!(imported.category_id.as_deref(), Some("3000010001"));
        assert_eq!(imported.price, Decimal::new(1590, 2));
        assert!(imported.is_recommended);
    }
}
