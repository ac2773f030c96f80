use chrono::NaiveTime;
use rust_xlsxwriter::{Format, Worksheet, XlsxError};

use super::cell::CellValue;

/// Максимальное число колонок xlsx
const MAX_COLUMNS: usize = 16_384;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Записать значение ячейки; пустые значения не пишутся
pub fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: usize,
    value: &CellValue,
) -> Result<(), XlsxError> {
    if col >= MAX_COLUMNS {
        return Err(XlsxError::RowColumnLimitError);
    }
    let col = col as u16;

    match value {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Date(datetime) => {
            let format = if datetime.time() == NaiveTime::MIN {
                Format::new().set_num_format(DATE_FORMAT)
            } else {
                Format::new().set_num_format(DATETIME_FORMAT)
            };
            worksheet.write_datetime_with_format(row, col, datetime, &format)?;
        }
        // Ошибку записать нельзя, сохраняется её текст
        CellValue::Error(_) => {
            worksheet.write_string(row, col, value.display_text())?;
        }
    }
    Ok(())
}

/// Записать строку значений начиная с колонки 0
pub fn write_row(worksheet: &mut Worksheet, row: u32, values: &[CellValue]) -> Result<(), XlsxError> {
    for (col, value) in values.iter().enumerate() {
        write_cell(worksheet, row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::spreadsheet::read_first_sheet;
    use chrono::{NaiveDate, Timelike};
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_written_values_read_back() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_row(
            worksheet,
            0,
            &[
                CellValue::Text("名称".to_string()),
                CellValue::Number(3.25),
                CellValue::Empty,
                CellValue::Bool(true),
            ],
        )
        .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = read_first_sheet(&bytes).unwrap();
        let row = grid.row(0).unwrap();
        assert_eq!(row[0], CellValue::Text("名称".to_string()));
        assert_eq!(row[1], CellValue::Number(3.25));
        assert_eq!(row[2], CellValue::Empty);
        assert_eq!(row[3], CellValue::Bool(true));
    }

    #[test]
    fn test_dates_stay_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let stamp = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_row(worksheet, 0, &[CellValue::Date(date), CellValue::Date(stamp)]).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = read_first_sheet(&bytes).unwrap();
        let row = grid.row(0).unwrap();
        assert_eq!(row[0], CellValue::Date(date));
        match &row[1] {
            CellValue::Date(read) => {
                assert_eq!(read.date(), stamp.date());
                assert_eq!((read.hour(), read.minute()), (9, 30));
            }
            other => panic!("expected a date, got {other:?}"),
        }
    }

    #[test]
    fn test_column_limit() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let result = write_cell(worksheet, 0, MAX_COLUMNS, &CellValue::Number(1.0));
        assert!(matches!(result, Err(XlsxError::RowColumnLimitError)));
    }
}
