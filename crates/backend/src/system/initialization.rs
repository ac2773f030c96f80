use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::a001_product::JsonFileRecordRepository;
use crate::domain::a002_template::JsonFileTemplateRegistry;
use crate::shared::config::{get_storage_root, resolve_path, Config};
use crate::shared::storage::FsBinaryStore;
use crate::shared::template_schema;
use crate::usecases::u501_import_products::ImportExecutor;
use crate::usecases::u502_generate_from_template::GenerateExecutor;

/// Всё, что нужно командам: конфигурация, локальные хранилища и executors
pub struct AppContext {
    pub config: Config,
    pub storage_root: PathBuf,
    pub records: JsonFileRecordRepository,
    pub import: ImportExecutor,
    pub generate: GenerateExecutor,
}

impl AppContext {
    /// Подготовить каталог хранилища и загрузить схему шаблона
    pub fn initialize(config: Config) -> Result<Self> {
        let storage_root = get_storage_root(&config);
        std::fs::create_dir_all(&storage_root).with_context(|| {
            format!("Cannot create storage directory {}", storage_root.display())
        })?;
        tracing::info!("Storage root: {}", storage_root.display());

        let schema_path = config.template.schema_path.as_deref().map(resolve_path);
        template_schema::initialize(schema_path.as_deref())?;

        let generate = GenerateExecutor::new(
            Arc::new(FsBinaryStore::new(storage_root.join("files"))),
            Arc::new(JsonFileTemplateRegistry::new(&storage_root)),
            config.template.clone(),
        );

        Ok(Self {
            records: JsonFileRecordRepository::new(&storage_root),
            import: ImportExecutor::new(config.import.clone()),
            generate,
            storage_root,
            config,
        })
    }

    /// Хранилище файлов (то же, что использует генерация)
    pub fn file_store(&self) -> FsBinaryStore {
        FsBinaryStore::new(self.storage_root.join("files"))
    }
}
