use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Значение ячейки, не зависящее от формата контейнера
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
    /// Значение-ошибка табличного процессора (#REF!, #DIV/0! ...)
    Error(String),
}

/// Шаблоны дат в порядке попыток; месяц и день всегда двузначные
const DATE_PATTERNS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日", "%Y%m%d"];

/// Значения, которые считаются "да" у флагов
const AFFIRMATIVE: [&str; 4] = ["是", "true", "1", "yes"];

impl CellValue {
    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(value) => CellValue::Date(value),
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => NaiveDateTime::from_str(s)
                .map(CellValue::Date)
                .unwrap_or_else(|_| CellValue::Text(s.clone())),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
        }
    }

    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// Пусто после приведения к строке. Ошибочные ячейки пустыми не считаются.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            CellValue::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Строковое представление для сопоставления и отображения
    ///
    /// Целые числа печатаются без дробной части, даты без времени, если оно нулевое.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(f) => format_number(*f),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(dt) => {
                if dt.time() == NaiveTime::MIN {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            CellValue::Error(e) => e.clone(),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ============================================================================
// Coercions: never fail, fall back to a default instead
// ============================================================================

/// Обрезанная строка; пустое значение превращается в None
pub fn to_text(cell: &CellValue) -> Option<String> {
    let text = cell.display_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Десятичное число с фиксированной точкой
pub fn to_decimal(cell: &CellValue) -> Option<Decimal> {
    match cell {
        CellValue::Number(f) if f.is_finite() => parse_decimal(&f.to_string()),
        CellValue::Text(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Цена: пусто или мусор даёт 0
pub fn to_price(cell: &CellValue) -> Decimal {
    match to_decimal(cell) {
        Some(price) => price,
        None => {
            if !cell.is_blank() {
                tracing::warn!("Cannot parse price '{}', using 0", cell.display_text());
            }
            Decimal::ZERO
        }
    }
}

fn to_whole_number(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(f) => *f,
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then(|| value.trunc())
}

/// Целочисленный счётчик (дробная часть отбрасывается)
pub fn to_integer(cell: &CellValue) -> Option<i32> {
    let value = to_whole_number(cell)?;
    if value < i32::MIN as f64 || value > i32::MAX as f64 {
        return None;
    }
    Some(value as i32)
}

/// Остаток: пусто, мусор или отрицательное число дают 0
pub fn to_stock(cell: &CellValue) -> u32 {
    match to_whole_number(cell) {
        Some(value) if value <= 0.0 => 0,
        Some(value) if value >= u32::MAX as f64 => u32::MAX,
        Some(value) => value as u32,
        None => {
            if !cell.is_blank() {
                tracing::warn!("Cannot parse stock '{}', using 0", cell.display_text());
            }
            0
        }
    }
}

pub fn to_flag(cell: &CellValue) -> bool {
    match to_text(cell) {
        Some(text) => {
            let lowered = text.to_lowercase();
            AFFIRMATIVE.contains(&lowered.as_str())
        }
        None => false,
    }
}

pub fn to_date(cell: &CellValue) -> Option<NaiveDate> {
    if let CellValue::Date(dt) = cell {
        return Some(dt.date());
    }

    let text = to_text(cell)?;
    let parsed = DATE_PATTERNS.iter().find_map(|pattern| {
        NaiveDate::parse_from_str(&text, pattern)
            .ok()
            .filter(|date| date.format(pattern).to_string() == text)
    });
    if parsed.is_none() {
        tracing::warn!("Cannot parse date '{}'", text);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_to_text_trims_and_blanks() {
        assert_eq!(to_text(&text("  可乐 ")), Some("可乐".to_string()));
        assert_eq!(to_text(&text("   ")), None);
        assert_eq!(to_text(&CellValue::Empty), None);
        assert_eq!(to_text(&CellValue::Number(6901234567892.0)), Some("6901234567892".to_string()));
        assert_eq!(to_text(&CellValue::Number(2.5)), Some("2.5".to_string()));
    }

    #[test]
    fn test_price_defaults_to_zero() {
        assert_eq!(to_price(&CellValue::Empty), Decimal::ZERO);
        assert_eq!(to_price(&text("abc")), Decimal::ZERO);
        assert_eq!(to_price(&text(" 12.50 ")), Decimal::from_str("12.50").unwrap());
        assert_eq!(to_price(&CellValue::Number(19.9)), Decimal::from_str("19.9").unwrap());
        assert_eq!(to_price(&text("1.5e2")), Decimal::from_str("150").unwrap());
    }

    #[test]
    fn test_stock_truncates_and_clamps() {
        assert_eq!(to_stock(&CellValue::Number(12.9)), 12);
        assert_eq!(to_stock(&text("7.0")), 7);
        assert_eq!(to_stock(&text("-3")), 0);
        assert_eq!(to_stock(&text("many")), 0);
        assert_eq!(to_stock(&CellValue::Empty), 0);
    }

    #[test]
    fn test_integer_is_optional() {
        assert_eq!(to_integer(&text("15")), Some(15));
        assert_eq!(to_integer(&CellValue::Number(-2.7)), Some(-2));
        assert_eq!(to_integer(&CellValue::Empty), None);
        assert_eq!(to_integer(&text("n/a")), None);
    }

    #[test]
    fn test_flag_affirmative_set() {
        for value in ["是", "TRUE", " yes ", "1"] {
            assert!(to_flag(&text(value)), "{value}");
        }
        assert!(to_flag(&CellValue::Number(1.0)));
        assert!(to_flag(&CellValue::Bool(true)));
        assert!(!to_flag(&text("否")));
        assert!(!to_flag(&CellValue::Empty));
    }

    #[test]
    fn test_date_patterns() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(to_date(&text("2024-03-05")), expected);
        assert_eq!(to_date(&text("2024/03/05")), expected);
        assert_eq!(to_date(&text("2024年03月05日")), expected);
        assert_eq!(to_date(&text("20240305")), expected);
        assert_eq!(to_date(&CellValue::Number(20240305.0)), expected);
        assert_eq!(to_date(&text("05.03.2024")), None);
        assert_eq!(to_date(&text("20241345")), None);
        assert_eq!(to_date(&text("2024-3-5")), None);
        assert_eq!(to_date(&text("2024/03/5")), None);
        assert_eq!(to_date(&text("2024年3月5日")), None);
    }

    #[test]
    fn test_native_date_cell() {
        let dt = NaiveDate::from_ymd_opt(2025, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let cell = CellValue::Date(dt);
        assert_eq!(to_date(&cell), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(cell.display_text(), "2025-01-31");
    }

    #[test]
    fn test_error_cell_is_not_blank() {
        let cell = CellValue::Error("#REF!".to_string());
        assert!(!cell.is_blank());
        assert_eq!(cell.as_error(), Some("#REF!"));
    }
}
