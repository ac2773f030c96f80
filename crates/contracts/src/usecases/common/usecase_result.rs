use serde::{Deserialize, Serialize};

/// Результат выполнения UseCase
pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Ошибка, которую видит вызывающая сторона
///
/// `code` стабилен и позволяет UI различать, например, "шаблон не загружен"
/// и "шаблон повреждён".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub const STRUCTURAL_DOCUMENT_ERROR: &'static str = "STRUCTURAL_DOCUMENT_ERROR";
    pub const BATCH_VALIDATION_FAILED: &'static str = "BATCH_VALIDATION_FAILED";
    pub const TEMPLATE_NOT_FOUND: &'static str = "TEMPLATE_NOT_FOUND";
    pub const TEMPLATE_FILE_ERROR: &'static str = "TEMPLATE_FILE_ERROR";
    pub const STORAGE_ERROR: &'static str = "STORAGE_ERROR";
    pub const VALIDATION_ERROR: &'static str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &'static str = "INTERNAL_ERROR";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(Self::STRUCTURAL_DOCUMENT_ERROR, message)
    }

    pub fn batch_validation(message: impl Into<String>) -> Self {
        Self::new(Self::BATCH_VALIDATION_FAILED, message)
    }

    pub fn template_not_found(message: impl Into<String>) -> Self {
        Self::new(Self::TEMPLATE_NOT_FOUND, message)
    }

    pub fn template_file(message: impl Into<String>) -> Self {
        Self::new(Self::TEMPLATE_FILE_ERROR, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(Self::STORAGE_ERROR, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(Self::VALIDATION_ERROR, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, message)
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        UseCaseError::internal(err.to_string())
    }
}
