use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

use super::StorageError;

/// Прочитать JSON-файл; отсутствующий файл даёт значение по умолчанию
pub async fn load_or_default<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Записать JSON через временный файл и rename
pub async fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_missing_file_gives_default_then_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let empty: BTreeMap<String, u32> = load_or_default(&path).await.unwrap();
        assert!(empty.is_empty());

        let mut value = BTreeMap::new();
        value.insert("rows".to_string(), 3u32);
        save(&path, &value).await.unwrap();

        let loaded: BTreeMap<String, u32> = load_or_default(&path).await.unwrap();
        assert_eq!(loaded, value);
    }
}
