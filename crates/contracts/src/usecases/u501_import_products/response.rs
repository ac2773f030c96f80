use serde::{Deserialize, Serialize};

use crate::domain::a001_product::ProductRecord;
use crate::enums::FormatType;

/// Значение поля `RowError::field`, когда ошибка относится ко всей строке
pub const WHOLE_ROW: &str = "whole row";

/// Ошибка разбора одной строки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// Номер строки так, как его видит пользователь (с 1)
    pub row_number: usize,
    pub field: String,
    pub message: String,
    pub original_value: Option<String>,
}

impl RowError {
    pub fn whole_row(row_number: usize, message: impl Into<String>) -> Self {
        Self {
            row_number,
            field: WHOLE_ROW.to_string(),
            message: message.into(),
            original_value: None,
        }
    }

    pub fn with_original_value(mut self, value: impl Into<String>) -> Self {
        self.original_value = Some(value.into());
        self
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "第{}行，字段[{}]：{}", self.row_number, self.field, self.message)?;
        if let Some(value) = &self.original_value {
            write!(f, "（原始值：{}）", value)?;
        }
        Ok(())
    }
}

/// Итог одного прохода импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub format_type: FormatType,
    /// success_count + failure_count; пустые строки не считаются
    pub total_count: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// Записи в порядке строк исходного файла
    pub records: Vec<ProductRecord>,
    /// Были ли записи отрезаны лимитом предпросмотра
    #[serde(default)]
    pub has_more_records: bool,
    pub errors: Vec<RowError>,
    pub has_more_errors: bool,
    pub remaining_error_count: usize,
    /// Обязательные колонки, которых не нашлось в заголовке
    #[serde(default)]
    pub missing_columns: Vec<String>,
    pub duration_ms: u64,
}

impl ImportOutcome {
    pub fn empty(format_type: FormatType) -> Self {
        Self {
            format_type,
            total_count: 0,
            success_count: 0,
            failure_count: 0,
            records: Vec::new(),
            has_more_records: false,
            errors: Vec::new(),
            has_more_errors: false,
            remaining_error_count: 0,
            missing_columns: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Первые `limit` ошибок для показа пользователю
    pub fn preview_errors(&self, limit: usize) -> &[RowError] {
        &self.errors[..self.errors.len().min(limit)]
    }

    /// Отрезать записи до `limit`, отметив факт усечения
    pub fn truncate_records(&mut self, limit: usize) {
        if self.records.len() > limit {
            self.records.truncate(limit);
            self.has_more_records = true;
        }
    }

    pub fn format_message(&self) -> &'static str {
        match self.format_type {
            FormatType::Partner => "已识别为平台格式，系统将自动转换数据",
            FormatType::Standard => "已识别为标准格式",
            FormatType::Unknown => "未识别格式类型",
        }
    }

    /// Сводка вида "预览成功 - ...（预计成功N行，M行存在错误）"
    pub fn summary(&self) -> String {
        format!(
            "预览成功 - {}（预计成功{}行，{}行存在错误）",
            self.format_message(),
            self.success_count,
            self.failure_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_display() {
        let err = RowError::whole_row(5, "无法读取单元格").with_original_value("#REF!");
        assert_eq!(err.field, WHOLE_ROW);
        assert_eq!(
            err.to_string(),
            "第5行，字段[whole row]：无法读取单元格（原始值：#REF!）"
        );
    }

    #[test]
    fn test_preview_errors_and_truncation() {
        let mut outcome = ImportOutcome::empty(FormatType::Standard);
        outcome.errors = (1..=30).map(|i| RowError::whole_row(i, "bad")).collect();
        assert_eq!(outcome.preview_errors(20).len(), 20);
        assert_eq!(outcome.preview_errors(100).len(), 30);

        outcome.records = (0..25).map(|_| ProductRecord::new_pending()).collect();
        outcome.truncate_records(20);
        assert_eq!(outcome.records.len(), 20);
        assert!(outcome.has_more_records);
    }
}
