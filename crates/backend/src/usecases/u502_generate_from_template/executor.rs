use chrono::Utc;
use contracts::domain::a001_product::ProductRecord;
use contracts::domain::a002_template::TemplateMetadata;
use contracts::enums::FormatType;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_generate_from_template::{
    GenerateFromTemplate, GenerateRequest, GeneratedFile, TemplatePreview, TemplateStatus,
};
use std::sync::Arc;

use super::error::TemplateError;
use super::template_writer::{fill_template, preview_template};
use crate::domain::a002_template::TemplateRegistry;
use crate::shared::config::TemplateConfig;
use crate::shared::spreadsheet::validate_file_name;
use crate::shared::storage::{BinaryStore, StorageError, XLSX_CONTENT_TYPE};

/// Executor для UseCase генерации файла по шаблону мерчанта
#[derive(Clone)]
pub struct GenerateExecutor {
    store: Arc<dyn BinaryStore>,
    registry: Arc<dyn TemplateRegistry>,
    config: TemplateConfig,
}

fn content_type_for(file_name: &str) -> &'static str {
    let lowered = file_name.to_ascii_lowercase();
    if lowered.ends_with(".xls") {
        "application/vnd.ms-excel"
    } else if lowered.ends_with(".csv") {
        "text/csv"
    } else {
        XLSX_CONTENT_TYPE
    }
}

impl GenerateExecutor {
    pub fn new(
        store: Arc<dyn BinaryStore>,
        registry: Arc<dyn TemplateRegistry>,
        config: TemplateConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    /// Тип шаблона, с которым работает генерация
    pub fn template_type(&self) -> FormatType {
        FormatType::from_code(&self.config.template_type).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown template type '{}' in config, using PARTNER",
                self.config.template_type
            );
            FormatType::Partner
        })
    }

    /// Загрузить шаблон мерчанта
    ///
    /// Проверяются расширение, размер и читаемость заголовка; затем файл
    /// сохраняется в хранилище, а метаданные в реестре.
    pub async fn register_template(
        &self,
        merchant_id: i64,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<TemplateMetadata, TemplateError> {
        validate_file_name(file_name)
            .map_err(|_| TemplateError::InvalidUpload("只支持 xlsx、xls、csv 格式的文件".to_string()))?;
        if bytes.is_empty() {
            return Err(TemplateError::InvalidUpload("上传的文件为空".to_string()));
        }
        if bytes.len() as u64 > self.config.max_upload_bytes {
            return Err(TemplateError::InvalidUpload(format!(
                "文件大小不能超过{}MB",
                self.config.max_upload_bytes / (1024 * 1024)
            )));
        }
        let preview = preview_template(bytes)?;

        let locator = self
            .store
            .upload_bytes(file_name, bytes, content_type_for(file_name))
            .await?;
        let metadata = TemplateMetadata::new(
            merchant_id,
            file_name,
            self.template_type(),
            locator,
            bytes.len() as u64,
        );
        self.registry.save(&metadata).await?;

        tracing::info!(
            "Merchant {}: template '{}' registered ({} bytes, {} columns) at {}",
            merchant_id,
            metadata.name,
            metadata.size,
            preview.column_count,
            metadata.storage_locator
        );
        Ok(metadata)
    }

    pub async fn template_status(&self, merchant_id: i64) -> Result<TemplateStatus, TemplateError> {
        let latest = self
            .registry
            .find_latest_template(merchant_id, self.template_type())
            .await?;

        Ok(match latest {
            Some(template) => TemplateStatus {
                has_template: true,
                template_name: Some(template.name),
                upload_time: Some(template.created_at),
                file_size: Some(template.size),
                template_type: Some(template.template_type),
            },
            None => TemplateStatus::absent(),
        })
    }

    async fn load_latest_template(
        &self,
        merchant_id: i64,
    ) -> Result<(TemplateMetadata, Vec<u8>), TemplateError> {
        let template = self
            .registry
            .find_latest_template(merchant_id, self.template_type())
            .await?
            .ok_or(TemplateError::NotFound { merchant_id })?;

        let bytes = match self.store.download_bytes(&template.storage_locator).await {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound(locator)) => {
                tracing::error!("Template file of merchant {} is gone: {}", merchant_id, locator);
                return Err(TemplateError::missing_file());
            }
            Err(e) => return Err(e.into()),
        };
        Ok((template, bytes))
    }

    /// Структура последнего шаблона мерчанта
    pub async fn preview_latest(&self, merchant_id: i64) -> Result<TemplatePreview, TemplateError> {
        let (_, bytes) = self.load_latest_template(merchant_id).await?;
        preview_template(&bytes)
    }

    /// Заполнить последний шаблон мерчанта и сохранить результат
    pub async fn generate_for_merchant(
        &self,
        merchant_id: i64,
        records: &[ProductRecord],
    ) -> Result<GeneratedFile, TemplateError> {
        tracing::info!(
            "Generating file for merchant {} from {} records",
            merchant_id,
            records.len()
        );
        let (template, template_bytes) = self.load_latest_template(merchant_id).await?;
        tracing::debug!("Using template '{}' ({})", template.name, template.id.0);

        let bytes = fill_template(&template_bytes, records, self.config.data_start_row)?;
        let file_name = format!(
            "美团上传_{}_{}.xlsx",
            merchant_id,
            Utc::now().format("%Y%m%d%H%M%S")
        );
        let locator = self
            .store
            .upload_bytes(&file_name, &bytes, XLSX_CONTENT_TYPE)
            .await?;

        tracing::info!("Generated '{}' ({} bytes) at {}", file_name, bytes.len(), locator);
        Ok(GeneratedFile {
            locator,
            file_name,
            size: bytes.len() as u64,
            record_count: records.len(),
        })
    }

    pub async fn execute(&self, request: &GenerateRequest) -> Result<GeneratedFile, TemplateError> {
        tracing::info!(
            "{} merchant {}",
            GenerateFromTemplate::log_prefix(),
            request.merchant_id
        );
        self.generate_for_merchant(request.merchant_id, &request.records)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_template::InMemoryTemplateRegistry;
    use crate::shared::spreadsheet::{read_first_sheet, CellValue};
    use crate::shared::storage::FsBinaryStore;
    use crate::usecases::u501_import_products::fixtures::{text, text_row, xlsx_bytes};

    fn executor(root: &std::path::Path) -> GenerateExecutor {
        GenerateExecutor::new(
            Arc::new(FsBinaryStore::new(root)),
            Arc::new(InMemoryTemplateRegistry::new()),
            TemplateConfig::default(),
        )
    }

    fn template_bytes() -> Vec<u8> {
        let mut rows = vec![text_row(&["商品名称", "价格", "库存"])];
        for i in 1..7 {
            rows.push(vec![text(&format!("说明{i}"))]);
        }
        rows.push(text_row(&["旧数据", "1", "1"]));
        xlsx_bytes(&rows)
    }

    fn record(name: &str) -> ProductRecord {
        let mut record = ProductRecord::new_pending();
        record.product_name = name.to_string();
        record.stock = 5;
        record
    }

    #[tokio::test]
    async fn test_generate_without_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = executor(dir.path()).generate_for_merchant(9, &[record("A")]).await;
        assert!(matches!(result, Err(TemplateError::NotFound { merchant_id: 9 })));
    }

    #[tokio::test]
    async fn test_register_and_generate() {
        let dir = tempfile::tempdir().unwrap();
        let executor = executor(dir.path());

        assert!(!executor.template_status(1).await.unwrap().has_template);
        let metadata = executor
            .register_template(1, "美团模板.xlsx", &template_bytes())
            .await
            .unwrap();
        let status = executor.template_status(1).await.unwrap();
        assert!(status.has_template);
        assert_eq!(status.template_name.as_deref(), Some("美团模板.xlsx"));
        assert_eq!(status.file_size, Some(metadata.size));
        assert_eq!(status.template_type, Some(FormatType::Partner));

        let generated = executor
            .generate_for_merchant(1, &[record("A"), record("B")])
            .await
            .unwrap();
        assert_eq!(generated.record_count, 2);
        assert!(generated.file_name.ends_with(".xlsx"));

        let bytes = FsBinaryStore::new(dir.path())
            .download_bytes(&generated.locator)
            .await
            .unwrap();
        assert_eq!(generated.size, bytes.len() as u64);
        let grid = read_first_sheet(&bytes).unwrap();
        assert_eq!(grid.row_count(), 9);
        assert_eq!(grid.row(7).unwrap()[0], CellValue::Text("A".to_string()));
        assert_eq!(grid.row(8).unwrap()[2], CellValue::Number(5.0));
    }

    #[tokio::test]
    async fn test_missing_template_file_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let executor = executor(dir.path());
        let metadata = executor
            .register_template(2, "t.xlsx", &template_bytes())
            .await
            .unwrap();
        FsBinaryStore::new(dir.path())
            .delete(&metadata.storage_locator)
            .await
            .unwrap();

        let result = executor.generate_for_merchant(2, &[]).await;
        assert!(matches!(result, Err(TemplateError::File(msg)) if msg.contains("丢失")));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TemplateConfig::default();
        config.max_upload_bytes = 16;
        let executor = GenerateExecutor::new(
            Arc::new(FsBinaryStore::new(dir.path())),
            Arc::new(InMemoryTemplateRegistry::new()),
            config,
        );

        let bytes = template_bytes();
        assert!(matches!(
            executor.register_template(1, "t.pdf", &bytes).await,
            Err(TemplateError::InvalidUpload(_))
        ));
        assert!(matches!(
            executor.register_template(1, "t.xlsx", &bytes).await,
            Err(TemplateError::InvalidUpload(msg)) if msg.contains("MB")
        ));
        assert!(!executor.template_status(1).await.unwrap().has_template);
    }
}
