use contracts::usecases::u501_import_products::{ImportMode, ImportRequest};
use serde_json::{json, Value};
use std::path::Path;

use super::{file_name_of, read_input, use_case_error};
use crate::domain::a001_product::RecordRepository;
use crate::shared::spreadsheet::read_first_sheet;
use crate::system::initialization::AppContext;
use crate::usecases::u501_import_products::{classify, missing_required_columns, ImportError};

/// classify <file>
pub fn classify_file(path: &Path) -> anyhow::Result<Value> {
    let bytes = read_input(path)?;
    let grid = read_first_sheet(&bytes).map_err(|e| use_case_error(ImportError::from(e)))?;
    let headers = grid
        .header_texts()
        .ok_or_else(|| use_case_error(ImportError::MissingHeader))?;

    let format = classify(&headers);
    Ok(json!({
        "formatType": format,
        "displayName": format.display_name(),
        "headers": headers,
        "missingColumns": missing_required_columns(&headers, format),
    }))
}

/// import <file> [--commit] [--merchant N]
pub async fn import_file(
    context: &AppContext,
    path: &Path,
    merchant_id: i64,
    commit: bool,
) -> anyhow::Result<Value> {
    let bytes = read_input(path)?;
    let request = ImportRequest {
        merchant_id,
        file_name: file_name_of(path),
        mode: if commit {
            ImportMode::Commit
        } else {
            ImportMode::Preview
        },
    };

    let outcome = context
        .import
        .execute(&request, &bytes, &context.records)
        .await
        .map_err(use_case_error)?;

    match request.mode {
        ImportMode::Preview => {
            let limit = context.import.preview_error_limit();
            Ok(json!({
                "message": outcome.summary(),
                "formatMessage": outcome.format_message(),
                "previewErrors": outcome.preview_errors(limit),
                "outcome": outcome,
            }))
        }
        ImportMode::Commit => {
            let stored = context
                .records
                .list_by_owner(merchant_id)
                .await
                .map_err(|e| use_case_error(ImportError::from(e)))?;
            Ok(json!({
                "message": format!("导入成功，共{}条", outcome.success_count),
                "storedForMerchant": stored.len(),
                "outcome": outcome,
            }))
        }
    }
}
