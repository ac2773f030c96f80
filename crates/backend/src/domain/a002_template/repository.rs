use async_trait::async_trait;
use contracts::domain::a002_template::TemplateMetadata;
use contracts::enums::FormatType;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::shared::storage::{json_file, StorageError};

/// Реестр загруженных шаблонов
#[async_trait]
pub trait TemplateRegistry: Send + Sync {
    async fn save(&self, metadata: &TemplateMetadata) -> Result<(), StorageError>;

    /// Самый свежий шаблон мерчанта данного типа
    async fn find_latest_template(
        &self,
        merchant_id: i64,
        template_type: FormatType,
    ) -> Result<Option<TemplateMetadata>, StorageError>;
}

fn latest(
    entries: &[TemplateMetadata],
    merchant_id: i64,
    template_type: FormatType,
) -> Option<TemplateMetadata> {
    entries
        .iter()
        .filter(|t| t.merchant_id == merchant_id && t.template_type == template_type)
        .max_by_key(|t| t.created_at)
        .cloned()
}

#[derive(Clone, Default)]
pub struct InMemoryTemplateRegistry {
    entries: Arc<RwLock<Vec<TemplateMetadata>>>,
}

impl InMemoryTemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateRegistry for InMemoryTemplateRegistry {
    async fn save(&self, metadata: &TemplateMetadata) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.push(metadata.clone());
        Ok(())
    }

    async fn find_latest_template(
        &self,
        merchant_id: i64,
        template_type: FormatType,
    ) -> Result<Option<TemplateMetadata>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(latest(&entries, merchant_id, template_type))
    }
}

/// Реестр в одном JSON-файле `<root>/templates.json`
#[derive(Debug, Clone)]
pub struct JsonFileTemplateRegistry {
    path: PathBuf,
}

impl JsonFileTemplateRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            path: root.into().join("templates.json"),
        }
    }
}

#[async_trait]
impl TemplateRegistry for JsonFileTemplateRegistry {
    async fn save(&self, metadata: &TemplateMetadata) -> Result<(), StorageError> {
        let mut entries: Vec<TemplateMetadata> = json_file::load_or_default(&self.path).await?;
        entries.push(metadata.clone());
        json_file::save(&self.path, &entries).await
    }

    async fn find_latest_template(
        &self,
        merchant_id: i64,
        template_type: FormatType,
    ) -> Result<Option<TemplateMetadata>, StorageError> {
        let entries: Vec<TemplateMetadata> = json_file::load_or_default(&self.path).await?;
        Ok(latest(&entries, merchant_id, template_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn template(merchant_id: i64, name: &str, age_minutes: i64) -> TemplateMetadata {
        let mut metadata =
            TemplateMetadata::new(merchant_id, name, FormatType::Partner, format!("x/{name}"), 10);
        metadata.created_at = metadata.created_at - Duration::minutes(age_minutes);
        metadata
    }

    #[tokio::test]
    async fn test_in_memory_latest_wins() {
        let registry = InMemoryTemplateRegistry::new();
        registry.save(&template(1, "old.xlsx", 60)).await.unwrap();
        registry.save(&template(1, "new.xlsx", 1)).await.unwrap();
        registry.save(&template(2, "other.xlsx", 0)).await.unwrap();

        let found = registry
            .find_latest_template(1, FormatType::Partner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "new.xlsx");
        assert!(registry
            .find_latest_template(1, FormatType::Standard)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_json_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        JsonFileTemplateRegistry::new(dir.path())
            .save(&template(5, "t.xlsx", 0))
            .await
            .unwrap();

        let reopened = JsonFileTemplateRegistry::new(dir.path());
        let found = reopened
            .find_latest_template(5, FormatType::Partner)
            .await
            .unwrap();
        assert_eq!(found.map(|t| t.name), Some("t.xlsx".to_string()));
    }
}
