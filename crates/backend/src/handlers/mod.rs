//! Обработчики команд CLI
//!
//! Каждый обработчик возвращает JSON для stdout. Ошибки движка приводятся
//! к `UseCaseError`, чтобы вызывающая сторона видела стабильный код.

pub mod u501_import_products;
pub mod u502_generate_from_template;

use anyhow::Context;
use contracts::domain::a001_product::ProductRecord;
use contracts::usecases::common::UseCaseError;
use std::path::Path;

pub(crate) fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))
}

pub(crate) fn read_records(path: &Path) -> anyhow::Result<Vec<ProductRecord>> {
    let bytes = read_input(path)?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("{} is not a JSON array of product records", path.display()))
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ошибка движка в виде anyhow, с сохранением кода
pub(crate) fn use_case_error(err: impl Into<UseCaseError>) -> anyhow::Error {
    anyhow::Error::new(err.into())
}
