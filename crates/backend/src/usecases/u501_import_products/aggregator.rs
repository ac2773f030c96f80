use contracts::domain::a001_product::ProductRecord;
use contracts::enums::FormatType;
use contracts::usecases::u501_import_products::{ImportOutcome, RowError};

/// Накопитель результатов прохода по строкам
///
/// Хранит не больше `error_detail_limit` ошибок; остальные только считает.
/// Полный список ведётся отдельно, если он нужен (режим commit).
pub struct ImportAggregator {
    error_detail_limit: usize,
    keep_all_errors: bool,
    records: Vec<ProductRecord>,
    errors: Vec<RowError>,
    all_errors: Vec<RowError>,
    success_count: usize,
    failure_count: usize,
    has_more_errors: bool,
    remaining_error_count: usize,
}

impl ImportAggregator {
    pub fn new(error_detail_limit: usize, keep_all_errors: bool) -> Self {
        Self {
            error_detail_limit,
            keep_all_errors,
            records: Vec::new(),
            errors: Vec::new(),
            all_errors: Vec::new(),
            success_count: 0,
            failure_count: 0,
            has_more_errors: false,
            remaining_error_count: 0,
        }
    }

    pub fn add_record(&mut self, record: ProductRecord) {
        self.success_count += 1;
        self.records.push(record);
    }

    pub fn add_error(&mut self, error: RowError) {
        self.failure_count += 1;
        if self.keep_all_errors {
            self.all_errors.push(error.clone());
        }

        if self.errors.len() < self.error_detail_limit {
            self.errors.push(error);
        } else {
            self.has_more_errors = true;
            self.remaining_error_count += 1;
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    /// Итог прохода и полный список ошибок (пустой, если он не вёлся)
    pub fn finish(self, format_type: FormatType, duration_ms: u64) -> (ImportOutcome, Vec<RowError>) {
        let outcome = ImportOutcome {
            format_type,
            total_count: self.success_count + self.failure_count,
            success_count: self.success_count,
            failure_count: self.failure_count,
            records: self.records,
            has_more_records: false,
            errors: self.errors,
            has_more_errors: self.has_more_errors,
            remaining_error_count: self.remaining_error_count,
            missing_columns: Vec::new(),
            duration_ms,
        };
        (outcome, self.all_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_capping() {
        let mut aggregator = ImportAggregator::new(100, false);
        for row in 0..150 {
            aggregator.add_error(RowError::whole_row(row + 2, "bad"));
        }
        aggregator.add_record(ProductRecord::new_pending());

        let (outcome, all) = aggregator.finish(FormatType::Standard, 5);
        assert_eq!(outcome.errors.len(), 100);
        assert!(outcome.has_more_errors);
        assert_eq!(outcome.remaining_error_count, 50);
        assert_eq!(outcome.failure_count, 150);
        assert_eq!(outcome.success_count, 1);
        assert_eq!(outcome.total_count, 151);
        assert!(all.is_empty());
    }

    #[test]
    fn test_exactly_at_limit_has_no_more() {
        let mut aggregator = ImportAggregator::new(3, true);
        for row in 0..3 {
            aggregator.add_error(RowError::whole_row(row, "bad"));
        }
        let (outcome, all) = aggregator.finish(FormatType::Partner, 0);
        assert_eq!(outcome.errors.len(), 3);
        assert!(!outcome.has_more_errors);
        assert_eq!(outcome.remaining_error_count, 0);
        assert_eq!(all.len(), 3);
    }
}
