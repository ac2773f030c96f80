use contracts::domain::a001_product::ProductRecord;
use contracts::usecases::u502_generate_from_template::TemplatePreview;
use rust_xlsxwriter::Workbook;

use super::error::TemplateError;
use super::header_rules::resolve_columns;
use crate::shared::spreadsheet::writer::{write_cell, write_row};
use crate::shared::spreadsheet::{read_all_sheets, SheetGrid};

/// Все листы шаблона и заголовок первого из них
fn read_template(template_bytes: &[u8]) -> Result<(Vec<SheetGrid>, Vec<String>), TemplateError> {
    if template_bytes.is_empty() {
        return Err(TemplateError::missing_file());
    }
    let sheets = read_all_sheets(template_bytes).map_err(TemplateError::corrupt_file)?;
    let headers = sheets
        .first()
        .and_then(SheetGrid::header_texts)
        .ok_or_else(TemplateError::missing_header)?;
    Ok((sheets, headers))
}

/// Заполнить шаблон мерчанта записями
///
/// На первом листе строки `0..data_start_row` переносятся как есть (значения,
/// даты остаются датами), всё, что было ниже, отбрасывается. Запись `i`
/// попадает в строку `data_start_row + i`. Остальные листы копируются целиком.
pub fn fill_template(
    template_bytes: &[u8],
    records: &[ProductRecord],
    data_start_row: u32,
) -> Result<Vec<u8>, TemplateError> {
    let (sheets, headers) = read_template(template_bytes)?;
    let columns = resolve_columns(&headers);
    let mapped = columns.iter().filter(|c| c.is_some()).count();

    let mut workbook = Workbook::new();
    for (index, grid) in sheets.iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&grid.name)?;

        if index > 0 {
            for (row, values) in grid.rows().enumerate() {
                write_row(worksheet, row as u32, values)?;
            }
            tracing::debug!("Copied sheet '{}' ({} rows)", grid.name, grid.row_count());
            continue;
        }

        tracing::info!(
            "Filling template sheet '{}': {} columns ({} mapped), {} records from row {}",
            grid.name,
            headers.len(),
            mapped,
            records.len(),
            data_start_row
        );
        let preserved = grid.row_count().min(data_start_row as usize);
        for (row, values) in grid.rows().take(preserved).enumerate() {
            write_row(worksheet, row as u32, values)?;
        }
        let stale = grid.row_count().saturating_sub(preserved);
        if stale > 0 {
            tracing::debug!("Dropped {} stale rows below the data offset", stale);
        }

        for (offset, record) in records.iter().enumerate() {
            let row = data_start_row + offset as u32;
            for (col, field) in columns.iter().enumerate() {
                if let Some(field) = field {
                    write_cell(worksheet, row, col, &field.to_cell(record))?;
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::info!("Template filled: {} bytes", bytes.len());
    Ok(bytes)
}

/// Разобрать структуру шаблона без заполнения
pub fn preview_template(template_bytes: &[u8]) -> Result<TemplatePreview, TemplateError> {
    let (sheets, headers) = read_template(template_bytes)?;
    let data_row_count = sheets
        .first()
        .map_or(0, |grid| grid.row_count().saturating_sub(1));
    let mapped_fields = resolve_columns(&headers)
        .into_iter()
        .map(|field| field.map(|f| f.name().to_string()))
        .collect();

    Ok(TemplatePreview {
        column_count: headers.len(),
        data_row_count,
        headers,
        mapped_fields,
    })
}
