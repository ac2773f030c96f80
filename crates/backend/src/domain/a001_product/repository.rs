use async_trait::async_trait;
use contracts::domain::a001_product::ProductRecord;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::shared::storage::{json_file, StorageError};

/// Приёмник/источник уже собранных записей
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Добавить пакет записей владельца, вернуть число вставленных
    async fn insert_batch(
        &self,
        owner_id: i64,
        records: &[ProductRecord],
    ) -> Result<usize, StorageError>;

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ProductRecord>, StorageError>;
}

/// In-memory репозиторий
#[derive(Clone, Default)]
pub struct InMemoryRecordRepository {
    records: Arc<RwLock<HashMap<i64, Vec<ProductRecord>>>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn insert_batch(
        &self,
        owner_id: i64,
        records: &[ProductRecord],
    ) -> Result<usize, StorageError> {
        let mut map = self.records.write().map_err(|_| StorageError::LockPoisoned)?;
        map.entry(owner_id)
            .or_default()
            .extend(records.iter().cloned());
        Ok(records.len())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ProductRecord>, StorageError> {
        let map = self.records.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(map.get(&owner_id).cloned().unwrap_or_default())
    }
}

/// Репозиторий в JSON-файлах: `<root>/records/<owner>.json`
#[derive(Debug, Clone)]
pub struct JsonFileRecordRepository {
    root: PathBuf,
}

impl JsonFileRecordRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn owner_file(&self, owner_id: i64) -> PathBuf {
        self.root.join("records").join(format!("{}.json", owner_id))
    }
}

#[async_trait]
impl RecordRepository for JsonFileRecordRepository {
    async fn insert_batch(
        &self,
        owner_id: i64,
        records: &[ProductRecord],
    ) -> Result<usize, StorageError> {
        let path = self.owner_file(owner_id);
        let mut stored: Vec<ProductRecord> = json_file::load_or_default(&path).await?;
        stored.extend(records.iter().cloned());
        json_file::save(&path, &stored).await?;

        tracing::info!(
            "Inserted {} records for owner {} ({} total)",
            records.len(),
            owner_id,
            stored.len()
        );
        Ok(records.len())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ProductRecord>, StorageError> {
        json_file::load_or_default(&self.owner_file(owner_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ProductRecord {
        let mut record = ProductRecord::new_pending();
        record.product_name = name.to_string();
        record
    }

    #[tokio::test]
    async fn test_in_memory_is_scoped_by_owner() {
        let repo = InMemoryRecordRepository::new();
        repo.insert_batch(1, &[named("a"), named("b")]).await.unwrap();
        repo.insert_batch(2, &[named("c")]).await.unwrap();

        let first = repo.list_by_owner(1).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].product_name, "b");
        assert!(repo.list_by_owner(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRecordRepository::new(dir.path());

        assert_eq!(repo.insert_batch(7, &[named("a")]).await.unwrap(), 1);
        assert_eq!(repo.insert_batch(7, &[named("b")]).await.unwrap(), 1);

        let names: Vec<_> = repo
            .list_by_owner(7)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.product_name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
