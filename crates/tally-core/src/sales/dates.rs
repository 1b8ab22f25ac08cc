//! Sale date normalization for POS exports.

use chrono::{Duration, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::CellValue;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
    static ref SLASH_DATE: Regex = Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$").unwrap();
}

/// Normalize a date cell to `YYYY-MM-DD`.
///
/// - `YYYY-MM-DD` text is returned unchanged.
/// - `YYYY/MM/DD` text has its slashes replaced.
/// - Numbers are serial dates counted from 1900-01-01 as day 1, without the
///   1900 leap-year correction.
/// - Native dates are formatted directly.
///
/// Anything else yields an empty string.
pub fn normalize_sale_date(cell: &CellValue) -> String {
    if cell.is_blank() {
        return String::new();
    }

    match cell {
        CellValue::Text(s) if ISO_DATE.is_match(s) => s.clone(),
        CellValue::Text(s) if SLASH_DATE.is_match(s) => s.replace('/', "-"),
        CellValue::Number(n) => serial_to_date(*n)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        _ => String::new(),
    }
}

/// Convert a spreadsheet serial number using the 1900-01-01 epoch.
///
/// Day 1 is 1900-01-01; the fractional time of day is dropped.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let offset = (serial - 1.0).floor();
    if offset.abs() > 3_000_000.0 {
        return None;
    }
    epoch.checked_add_signed(Duration::days(offset as i64))
}

/// Parse a normalized date, rejecting impossible calendar values.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_iso_passthrough() {
        assert_eq!(normalize_sale_date(&text("2024-03-05")), "2024-03-05");
    }

    #[test]
    fn test_slash_form() {
        assert_eq!(normalize_sale_date(&text("2024/03/05")), "2024-03-05");
    }

    #[test]
    fn test_serial_number() {
        assert_eq!(normalize_sale_date(&CellValue::Number(45000.0)), "2023-03-16");
        assert_eq!(normalize_sale_date(&CellValue::Number(1.0)), "1900-01-01");
        assert_eq!(normalize_sale_date(&CellValue::Number(61.0)), "1900-03-02");
    }

    #[test]
    fn test_serial_time_of_day_is_dropped() {
        assert_eq!(normalize_sale_date(&CellValue::Number(45000.75)), "2023-03-16");
    }

    #[test]
    fn test_native_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(normalize_sale_date(&CellValue::Date(date)), "2024-03-05");
    }

    #[test]
    fn test_unsupported_values() {
        assert_eq!(normalize_sale_date(&CellValue::Bool(true)), "");
        assert_eq!(normalize_sale_date(&CellValue::Empty), "");
        assert_eq!(normalize_sale_date(&text("05.03.2024")), "");
        assert_eq!(normalize_sale_date(&text(" 2024-03-05")), "");
        assert_eq!(normalize_sale_date(&CellValue::Number(f64::NAN)), "");
    }

    #[test]
    fn test_parse_iso_date_rejects_impossible_dates() {
        assert!(parse_iso_date("2024-02-29").is_some());
        assert!(parse_iso_date("2024-13-01").is_none());
    }
}
