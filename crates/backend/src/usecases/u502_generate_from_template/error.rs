use contracts::usecases::common::UseCaseError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use crate::shared::storage::StorageError;

/// Ошибки работы с шаблонами мерчанта
///
/// `NotFound`: шаблон не загружен. `File`: шаблон есть, но прочитать его нельзя.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("no template uploaded for merchant {merchant_id}")]
    NotFound { merchant_id: i64 },

    #[error("template file error: {0}")]
    File(String),

    #[error("invalid template upload: {0}")]
    InvalidUpload(String),

    #[error("cannot write workbook: {0}")]
    Write(#[from] XlsxError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TemplateError {
    pub fn missing_file() -> Self {
        TemplateError::File("模板文件丢失，请重新上传".to_string())
    }

    pub fn corrupt_file(details: impl std::fmt::Display) -> Self {
        TemplateError::File(format!("模板文件损坏：{}", details))
    }

    pub fn missing_header() -> Self {
        TemplateError::File("模板缺少表头".to_string())
    }
}

impl From<TemplateError> for UseCaseError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound { merchant_id } => {
                UseCaseError::template_not_found("请先上传美团模板")
                    .with_details(format!("merchant {}", merchant_id))
            }
            TemplateError::File(message) => UseCaseError::template_file(message),
            TemplateError::InvalidUpload(message) => UseCaseError::validation(message),
            TemplateError::Write(inner) => {
                UseCaseError::internal("生成文件失败").with_details(inner.to_string())
            }
            TemplateError::Storage(inner) => UseCaseError::storage(inner.to_string()),
        }
    }
}
