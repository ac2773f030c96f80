use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_import_products::RowError;
use thiserror::Error;

use crate::shared::spreadsheet::WorkbookError;
use crate::shared::storage::StorageError;

/// Фатальные ошибки импорта документа
#[derive(Debug, Error)]
pub enum ImportError {
    /// Документ не читается или не является таблицей
    #[error("structural document error: {0}")]
    Structural(#[from] WorkbookError),

    #[error("structural document error: header row is missing")]
    MissingHeader,

    /// Режим commit: хотя бы одна строка не разобрана
    #[error("batch validation failed: {} row(s) rejected", errors.len())]
    BatchValidation { errors: Vec<RowError> },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<ImportError> for UseCaseError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Structural(inner) => {
                UseCaseError::structural("文件无法解析").with_details(inner.to_string())
            }
            ImportError::MissingHeader => {
                UseCaseError::structural("文件缺少表头").with_details("header row is missing")
            }
            ImportError::BatchValidation { errors } => {
                let details = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                UseCaseError::batch_validation(format!("{}行数据校验失败", errors.len()))
                    .with_details(details)
            }
            ImportError::Storage(inner) => UseCaseError::storage(inner.to_string()),
        }
    }
}
