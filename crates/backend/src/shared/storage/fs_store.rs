use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

use super::{BinaryStore, StorageError};

/// Бинарное хранилище в локальной директории
///
/// Локатор имеет вид `<uuid>/<имя файла>` относительно корня.
#[derive(Debug, Clone)]
pub struct FsBinaryStore {
    root: PathBuf,
}

impl FsBinaryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, locator: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(locator);
        let safe = !locator.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(StorageError::InvalidLocator(locator.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

/// Только последний компонент имени, без путей
fn file_name_only(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "." || base == ".." {
        "file".to_string()
    } else {
        base.to_string()
    }
}

#[async_trait]
impl BinaryStore for FsBinaryStore {
    async fn upload_bytes(
        &self,
        name: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let locator = format!("{}/{}", Uuid::new_v4(), file_name_only(name));
        let path = self.resolve(&locator)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await?;

        tracing::debug!(
            "Stored {} bytes ({}) at {}",
            data.len(),
            content_type,
            path.display()
        );
        Ok(locator)
    }

    async fn download_bytes(&self, locator: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(locator)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(locator.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, locator: &str) -> Result<(), StorageError> {
        let path = self.resolve(locator)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(locator.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
