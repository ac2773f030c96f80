use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::Cursor;
use thiserror::Error;

use super::cell::CellValue;

/// Разрешённые расширения загружаемых файлов
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Ошибки чтения/записи табличного документа
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("document is empty")]
    Empty,

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported file extension '{0}', expected one of xlsx, xls, csv")]
    UnsupportedExtension(String),

    #[error("cannot open workbook: {0}")]
    Open(String),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("cannot read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

/// Вид контейнера, определённый по сигнатуре
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// xlsx / ods (zip)
    Zip,
    /// xls (OLE2 compound file)
    Ole,
    /// Текст в UTF-8, читается как CSV
    Text,
}

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub fn sniff(bytes: &[u8]) -> Result<ContainerKind, WorkbookError> {
    if bytes.is_empty() {
        return Err(WorkbookError::Empty);
    }
    if bytes.starts_with(&ZIP_MAGIC) {
        return Ok(ContainerKind::Zip);
    }
    if bytes.starts_with(&OLE_MAGIC) {
        return Ok(ContainerKind::Ole);
    }
    let body = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) if !text.contains('\0') => Ok(ContainerKind::Text),
        _ => Err(WorkbookError::UnsupportedFormat(format!(
            "unrecognized signature {:02X?}",
            &bytes[..bytes.len().min(8)]
        ))),
    }
}

/// Проверка имени файла по расширению
pub fn validate_file_name(file_name: &str) -> Result<(), WorkbookError> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(WorkbookError::UnsupportedExtension(extension))
    }
}

/// Первый лист документа в абсолютных координатах
///
/// Строка 0 всегда соответствует первой строке листа, даже если она пустая.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut grid = Self {
            name: name.into(),
            rows,
        };
        grid.trim();
        grid
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Тексты строки заголовка (строка 0); None, если строки нет или она пустая
    pub fn header_texts(&self) -> Option<Vec<String>> {
        let header = self.rows.first()?;
        if header.iter().all(CellValue::is_blank) {
            return None;
        }
        Some(header.iter().map(CellValue::display_text).collect())
    }

    /// Убрать пустые ячейки в конце строк и пустые строки в конце листа
    fn trim(&mut self) {
        for row in &mut self.rows {
            while row.last().is_some_and(|c| matches!(c, CellValue::Empty)) {
                row.pop();
            }
        }
        while self.rows.last().is_some_and(|r| r.is_empty()) {
            self.rows.pop();
        }
    }
}

/// Прочитать первый лист документа любого поддерживаемого формата
pub fn read_first_sheet(bytes: &[u8]) -> Result<SheetGrid, WorkbookError> {
    match sniff(bytes)? {
        ContainerKind::Zip | ContainerKind::Ole => {
            let mut workbook = open_spreadsheet(bytes)?;
            let name = workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or(WorkbookError::NoWorksheet)?;
            read_sheet(&mut workbook, 0, name)
        }
        ContainerKind::Text => read_csv(bytes),
    }
}

/// Прочитать все листы документа в исходном порядке (у CSV один лист)
pub fn read_all_sheets(bytes: &[u8]) -> Result<Vec<SheetGrid>, WorkbookError> {
    match sniff(bytes)? {
        ContainerKind::Zip | ContainerKind::Ole => {
            let mut workbook = open_spreadsheet(bytes)?;
            let names = workbook.sheet_names();
            if names.is_empty() {
                return Err(WorkbookError::NoWorksheet);
            }
            names
                .into_iter()
                .enumerate()
                .map(|(index, name)| read_sheet(&mut workbook, index, name))
                .collect()
        }
        ContainerKind::Text => Ok(vec![read_csv(bytes)?]),
    }
}

fn open_spreadsheet(bytes: &[u8]) -> Result<Sheets<Cursor<Vec<u8>>>, WorkbookError> {
    open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| WorkbookError::Open(e.to_string()))
}

fn read_sheet(
    workbook: &mut Sheets<Cursor<Vec<u8>>>,
    index: usize,
    name: String,
) -> Result<SheetGrid, WorkbookError> {
    let range = workbook
        .worksheet_range_at(index)
        .ok_or(WorkbookError::NoWorksheet)?
        .map_err(|e| WorkbookError::Open(e.to_string()))?;

    tracing::debug!(
        "Opened sheet '{}' ({} x {})",
        name,
        range.height(),
        range.width()
    );

    Ok(SheetGrid::new(name, absolute_rows(&range)))
}

/// calamine обрезает пустые строки/колонки слева и сверху, восстанавливаем смещение
fn absolute_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
    for source in range.rows() {
        let mut row = vec![CellValue::Empty; col_offset];
        row.extend(source.iter().map(CellValue::from_data));
        rows.push(row);
    }
    rows
}

fn read_csv(bytes: &[u8]) -> Result<SheetGrid, WorkbookError> {
    let body = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::from_text).collect());
    }

    Ok(SheetGrid::new("csv", rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_sniff() {
        assert!(matches!(sniff(b""), Err(WorkbookError::Empty)));
        assert_eq!(sniff(b"PK\x03\x04rest").unwrap(), ContainerKind::Zip);
        assert_eq!(sniff(&OLE_MAGIC).unwrap(), ContainerKind::Ole);
        assert_eq!(sniff("\u{feff}商品名称*,价格".as_bytes()).unwrap(), ContainerKind::Text);
        assert!(matches!(
            sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
            Err(WorkbookError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("goods.XLSX").is_ok());
        assert!(validate_file_name("goods.csv").is_ok());
        assert!(matches!(
            validate_file_name("goods.pdf"),
            Err(WorkbookError::UnsupportedExtension(ext)) if ext == "pdf"
        ));
        assert!(validate_file_name("goods").is_err());
    }

    #[test]
    fn test_read_xlsx_keeps_absolute_positions() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("商品").unwrap();
        // Первая строка и первая колонка пустые
        worksheet.write_string(1, 1, "商品名称").unwrap();
        worksheet.write_number(2, 1, 9.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = read_first_sheet(&bytes).unwrap();
        assert_eq!(grid.name, "商品");
        assert_eq!(grid.row_count(), 3);
        assert!(grid.header_texts().is_none());
        assert_eq!(grid.row(1).unwrap()[1], CellValue::Text("商品名称".to_string()));
        assert_eq!(grid.row(2).unwrap()[1], CellValue::Number(9.5));
    }

    #[test]
    fn test_read_csv_with_bom() {
        let data = "\u{feff}商品名称*,类目ID*,价格(元)*\n可乐,1001001001,3.5\n,,\n";
        let grid = read_first_sheet(data.as_bytes()).unwrap();
        assert_eq!(
            grid.header_texts().unwrap(),
            vec!["商品名称*", "类目ID*", "价格(元)*"]
        );
        assert_eq!(grid.row(1).unwrap()[2], CellValue::Text("3.5".to_string()));
        // Пустая последняя строка отрезается
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_read_all_sheets_in_order() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("商品").unwrap();
        let lists = workbook.add_worksheet();
        lists.set_name("类目列表").unwrap();
        lists.write_string(2, 0, "饮料").unwrap();
        workbook.add_worksheet().set_name("空白").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let sheets = read_all_sheets(&bytes).unwrap();
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["商品", "类目列表", "空白"]);
        assert_eq!(sheets[1].row(2).unwrap()[0], CellValue::Text("饮料".to_string()));
        assert_eq!(sheets[2].row_count(), 0);

        let csv = read_all_sheets("商品名称,价格\n可乐,3".as_bytes()).unwrap();
        assert_eq!(csv.len(), 1);
    }

    #[test]
    fn test_corrupt_zip_is_open_error() {
        let bytes = b"PK\x03\x04definitely not a workbook";
        assert!(matches!(read_first_sheet(bytes), Err(WorkbookError::Open(_))));
    }
}
