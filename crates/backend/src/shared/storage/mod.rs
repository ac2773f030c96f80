//! Внешние хранилища: бинарные файлы, реестр шаблонов, записи товаров
//!
//! Движок видит их только через трейты; локальные реализации на файловой
//! системе нужны CLI и тестам.

pub mod fs_store;
pub mod json_file;

use async_trait::async_trait;
use thiserror::Error;

pub use fs_store::FsBinaryStore;

/// Ошибки адаптеров хранения
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid locator: {0}")]
    InvalidLocator(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Хранилище двоичных объектов
#[async_trait]
pub trait BinaryStore: Send + Sync {
    /// Сохранить байты, вернуть локатор для последующего чтения
    async fn upload_bytes(
        &self,
        name: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    async fn download_bytes(&self, locator: &str) -> Result<Vec<u8>, StorageError>;

    async fn delete(&self, locator: &str) -> Result<(), StorageError>;
}

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
