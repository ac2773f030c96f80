use contracts::usecases::u502_generate_from_template::GenerateRequest;
use serde_json::{json, Value};
use std::path::Path;

use super::{file_name_of, read_input, read_records, use_case_error};
use crate::domain::a001_product::RecordRepository;
use crate::shared::storage::BinaryStore;
use crate::shared::template_schema;
use crate::system::initialization::AppContext;
use crate::usecases::u501_import_products::ImportError;
use crate::usecases::u502_generate_from_template::blank_template::{
    schema_template, standard_import_template,
};
use crate::usecases::u502_generate_from_template::{preview_template, TemplateError};

fn write_output(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, bytes)?;
    tracing::info!("Wrote {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

/// register-template <file> --merchant N
pub async fn register_template(
    context: &AppContext,
    path: &Path,
    merchant_id: i64,
) -> anyhow::Result<Value> {
    let bytes = read_input(path)?;
    let metadata = context
        .generate
        .register_template(merchant_id, &file_name_of(path), &bytes)
        .await
        .map_err(use_case_error)?;
    Ok(json!({ "message": "模板上传成功", "template": metadata }))
}

/// template-status --merchant N
pub async fn template_status(context: &AppContext, merchant_id: i64) -> anyhow::Result<Value> {
    let status = context
        .generate
        .template_status(merchant_id)
        .await
        .map_err(use_case_error)?;
    Ok(serde_json::to_value(status)?)
}

/// template-preview [<file>] [--merchant N]
pub async fn template_preview(
    context: &AppContext,
    path: Option<&Path>,
    merchant_id: i64,
) -> anyhow::Result<Value> {
    let preview = match path {
        Some(path) => preview_template(&read_input(path)?).map_err(use_case_error)?,
        None => context
            .generate
            .preview_latest(merchant_id)
            .await
            .map_err(use_case_error)?,
    };
    Ok(serde_json::to_value(preview)?)
}

/// generate --merchant N [--records FILE] [--out FILE]
///
/// Без `--records` берутся записи, сохранённые для мерчанта командой `import --commit`.
pub async fn generate(
    context: &AppContext,
    merchant_id: i64,
    records_path: Option<&Path>,
    out: Option<&Path>,
) -> anyhow::Result<Value> {
    let records = match records_path {
        Some(path) => read_records(path)?,
        None => context
            .records
            .list_by_owner(merchant_id)
            .await
            .map_err(|e| use_case_error(ImportError::from(e)))?,
    };

    let request = GenerateRequest {
        merchant_id,
        records,
    };
    let generated = context
        .generate
        .execute(&request)
        .await
        .map_err(use_case_error)?;

    if let Some(out) = out {
        let bytes = context
            .file_store()
            .download_bytes(&generated.locator)
            .await
            .map_err(|e| use_case_error(TemplateError::from(e)))?;
        write_output(out, &bytes)?;
    }
    Ok(json!({ "message": "文件生成成功", "file": generated }))
}

/// blank-template --out FILE [--schema] [--records FILE]
pub fn blank_template(
    out: &Path,
    use_schema: bool,
    records_path: Option<&Path>,
) -> anyhow::Result<Value> {
    let bytes = if use_schema {
        let records = match records_path {
            Some(path) => read_records(path)?,
            None => Vec::new(),
        };
        schema_template(template_schema::get()?, &records).map_err(use_case_error)?
    } else {
        standard_import_template().map_err(use_case_error)?
    };
    write_output(out, &bytes)?;
    Ok(json!({ "path": out.display().to_string(), "size": bytes.len() }))
}
