//! Чтение и запись табличных документов (xlsx/xls/ods/csv)
//!
//! Всё, что выше этого модуля, работает с [`SheetGrid`] и [`CellValue`]
//! и не знает, из какого контейнера пришли данные.

pub mod cell;
pub mod header;
pub mod workbook;
pub mod writer;

pub use cell::CellValue;
pub use header::{normalize, KeywordRule};
pub use workbook::{read_all_sheets, read_first_sheet, validate_file_name, SheetGrid, WorkbookError};
