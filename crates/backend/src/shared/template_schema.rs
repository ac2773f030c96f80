//! Статическая схема партнёрского шаблона
//!
//! Упорядоченный список `{field, headerName}`, по которому строится пустой
//! шаблон для выгрузки. Загружается один раз при старте: встроенный JSON
//! или файл из `[template] schema_path`.

use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::Path;

use crate::domain::a001_product::ProductField;

const EMBEDDED_SCHEMA: &str = include_str!("template_schema.json");

static SCHEMA: OnceCell<TemplateSchema> = OnceCell::new();

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSchema {
    pub template_name: String,
    pub version: String,
    pub columns: Vec<TemplateColumn>,
}

/// Колонка шаблона
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateColumn {
    /// Имя поля записи в camelCase
    pub field: String,
    pub header_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    pub max_length: Option<u32>,
    pub pattern: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl TemplateColumn {
    /// Подсказка для строки-пояснения под заголовком
    pub fn hint(&self) -> String {
        let mut parts = vec![if self.required { "必填" } else { "选填" }.to_string()];
        if let Some(max_length) = self.max_length {
            parts.push(format!("最多{}字", max_length));
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) => parts.push(format!("{}~{}", min, max)),
            (Some(min), None) => parts.push(format!(">={}", min)),
            (None, Some(max)) => parts.push(format!("<={}", max)),
            (None, None) => {}
        }
        if self.value_type.as_deref() == Some("flag") {
            parts.push("是/否".to_string());
        }
        if self.value_type.as_deref() == Some("date") {
            parts.push("YYYY-MM-DD".to_string());
        }
        parts.join("，")
    }
}

impl TemplateSchema {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let schema: TemplateSchema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.columns.is_empty() {
            anyhow::bail!("template schema '{}' has no columns", self.template_name);
        }
        for column in &self.columns {
            if ProductField::from_name(&column.field).is_none() {
                anyhow::bail!(
                    "template schema column '{}' refers to unknown field '{}'",
                    column.header_name,
                    column.field
                );
            }
        }
        Ok(())
    }

    /// Колонки вместе с полями записи
    pub fn fields(&self) -> impl Iterator<Item = (&TemplateColumn, ProductField)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| ProductField::from_name(&c.field).map(|f| (c, f)))
    }
}

/// Загрузить схему при старте процесса
pub fn initialize(path: Option<&Path>) -> anyhow::Result<&'static TemplateSchema> {
    SCHEMA.get_or_try_init(|| {
        let schema = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).with_context(|| {
                    format!("cannot read template schema {}", path.display())
                })?;
                TemplateSchema::parse(&json)?
            }
            None => TemplateSchema::parse(EMBEDDED_SCHEMA)?,
        };
        tracing::info!(
            "Template schema '{}' v{} loaded: {} columns",
            schema.template_name,
            schema.version,
            schema.columns.len()
        );
        Ok(schema)
    })
}

/// Текущая схема (встроенная, если `initialize` не вызывался)
pub fn get() -> anyhow::Result<&'static TemplateSchema> {
    initialize(None)
}
