//! Сборка тестовых таблиц в памяти

use rust_xlsxwriter::Workbook;

use crate::shared::spreadsheet::writer::write_row;
use crate::shared::spreadsheet::CellValue;

pub fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

pub fn number(n: f64) -> CellValue {
    CellValue::Number(n)
}

pub fn text_row(items: &[&str]) -> Vec<CellValue> {
    items.iter().map(|s| text(s)).collect()
}

/// xlsx из строк, начиная с ячейки A1
pub fn xlsx_bytes(rows: &[Vec<CellValue>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (index, row) in rows.iter().enumerate() {
        write_row(worksheet, index as u32, row).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

pub fn standard_header() -> Vec<CellValue> {
    text_row(&["商品名称*", "类目ID*", "价格(元)*", "库存", "商品描述", "图片URL"])
}

pub fn standard_row(name: &str, price: &str, stock: f64) -> Vec<CellValue> {
    vec![
        text(name),
        text("1001001001"),
        text(price),
        number(stock),
        text("描述"),
        text("https://img.example/a.jpg"),
    ]
}

pub fn partner_header() -> Vec<CellValue> {
    text_row(&["SKU ID", "商品类目ID", "商品名称", "价格", "库存", "力荐"])
}

/// Строка-пояснение под заголовком партнёрского формата
pub fn partner_description_row() -> Vec<CellValue> {
    text_row(&["系统编号", "必填", "必填", "单位：元", "整数", "是/否"])
}
