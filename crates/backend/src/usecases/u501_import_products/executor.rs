use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_products::{
    ImportMode, ImportOutcome, ImportProducts, ImportRequest,
};
use std::time::Instant;

use super::aggregator::ImportAggregator;
use super::column_mapper::map_columns;
use super::error::ImportError;
use super::format_detector::{classify, missing_required_columns};
use super::row_parser::{is_blank_row, parse_row};
use crate::domain::a001_product::RecordRepository;
use crate::shared::config::ImportConfig;
use crate::shared::spreadsheet::{read_first_sheet, validate_file_name, SheetGrid};

/// Executor для UseCase импорта товаров
#[derive(Debug, Clone)]
pub struct ImportExecutor {
    config: ImportConfig,
}

impl ImportExecutor {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Один синхронный проход по документу
    ///
    /// preview всегда возвращает итог (записи усечены до `preview_row_limit`),
    /// commit падает с `BatchValidation`, если не разобралась хотя бы одна строка.
    pub fn import_document(
        &self,
        bytes: &[u8],
        mode: ImportMode,
    ) -> Result<ImportOutcome, ImportError> {
        let grid = read_first_sheet(bytes)?;
        self.import_grid(&grid, mode)
    }

    /// Проход по уже прочитанному листу
    pub fn import_grid(&self, grid: &SheetGrid, mode: ImportMode) -> Result<ImportOutcome, ImportError> {
        let start_time = Instant::now();

        let headers = grid.header_texts().ok_or(ImportError::MissingHeader)?;

        let format_type = classify(&headers);
        let mapping = map_columns(&headers, format_type);
        tracing::info!(
            "Sheet '{}': {} rows, format {}, mapping {}",
            grid.name,
            grid.row_count(),
            format_type,
            mapping
        );

        let mut aggregator =
            ImportAggregator::new(self.config.error_detail_limit, mode == ImportMode::Commit);
        let mut skipped = 0usize;

        for (index, row) in grid.rows().enumerate().skip(format_type.data_row_offset()) {
            if is_blank_row(row) {
                skipped += 1;
                continue;
            }
            // Номер строки так, как его видит пользователь
            match parse_row(row, &mapping, index + 1) {
                Ok(record) => aggregator.add_record(record),
                Err(error) => {
                    tracing::warn!("{}", error);
                    aggregator.add_error(error);
                }
            }
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let (mut outcome, all_errors) = aggregator.finish(format_type, duration_ms);
        outcome.missing_columns = missing_required_columns(&headers, format_type);

        tracing::info!(
            "Import pass done in {}ms: {} ok, {} failed, {} blank rows skipped",
            duration_ms,
            outcome.success_count,
            outcome.failure_count,
            skipped
        );

        match mode {
            ImportMode::Preview => {
                outcome.truncate_records(self.config.preview_row_limit);
                Ok(outcome)
            }
            ImportMode::Commit if outcome.failure_count > 0 => {
                tracing::error!(
                    "Commit rejected: {} row(s) failed validation",
                    all_errors.len()
                );
                Err(ImportError::BatchValidation { errors: all_errors })
            }
            ImportMode::Commit => Ok(outcome),
        }
    }

    /// Импорт в режиме commit с сохранением записей мерчанта
    pub async fn commit(
        &self,
        repository: &dyn RecordRepository,
        merchant_id: i64,
        bytes: &[u8],
    ) -> Result<ImportOutcome, ImportError> {
        let outcome = self.import_document(bytes, ImportMode::Commit)?;
        let inserted = repository.insert_batch(merchant_id, &outcome.records).await?;
        tracing::info!("Merchant {}: inserted {} records", merchant_id, inserted);
        Ok(outcome)
    }

    /// Обработать загруженный файл согласно запросу
    pub async fn execute(
        &self,
        request: &ImportRequest,
        bytes: &[u8],
        repository: &dyn RecordRepository,
    ) -> Result<ImportOutcome, ImportError> {
        tracing::info!(
            "{} merchant {}, file '{}', mode {:?}",
            ImportProducts::log_prefix(),
            request.merchant_id,
            request.file_name,
            request.mode
        );
        validate_file_name(&request.file_name)?;

        match request.mode {
            ImportMode::Preview => self.import_document(bytes, ImportMode::Preview),
            ImportMode::Commit => self.commit(repository, request.merchant_id, bytes).await,
        }
    }

    pub fn preview_error_limit(&self) -> usize {
        self.config.preview_error_limit
    }
}
