//! POS sales data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of normalized daily item sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Day of the sale.
    pub sale_date: NaiveDate,

    /// Catalog key. Never empty.
    pub item_code: String,

    /// Item name as exported, may be empty.
    pub item_name: String,

    /// Quantity sold, may be fractional.
    pub qty: f64,

    /// Net sales in whole currency units.
    pub net_sales: Decimal,
}

/// A raw spreadsheet cell, independent of the decoding library.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    /// Whether the cell counts as missing for a required field.
    ///
    /// Empty text, zero, `false` and NaN all count as missing.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
            CellValue::Bool(b) => !b,
            CellValue::Date(_) => false,
        }
    }

    /// String form used for codes, names and header labels.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Numeric coercion. Blank cells are 0, unparseable text is NaN.
    pub fn to_number(&self) -> f64 {
        if self.is_blank() {
            return 0.0;
        }
        match self {
            CellValue::Number(n) => *n,
            CellValue::Bool(_) => 1.0,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            CellValue::Empty | CellValue::Date(_) => f64::NAN,
        }
    }
}

/// Integral values print without a fractional part, like spreadsheet display.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text(String::new()).is_blank());
        assert!(CellValue::Number(0.0).is_blank());
        assert!(CellValue::Bool(false).is_blank());
        assert!(!CellValue::Text("  ".into()).is_blank());
        assert!(!CellValue::Number(3.0).is_blank());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(CellValue::Number(1001.0).to_text(), "1001");
        assert_eq!(CellValue::Number(1.5).to_text(), "1.5");
        assert_eq!(CellValue::Text(" A01 ".into()).to_text(), " A01 ");
    }

    #[test]
    fn test_to_number() {
        assert_eq!(CellValue::Empty.to_number(), 0.0);
        assert_eq!(CellValue::Text(" 12.5 ".into()).to_number(), 12.5);
        assert_eq!(CellValue::Text("   ".into()).to_number(), 0.0);
        assert!(CellValue::Text("abc".into()).to_number().is_nan());
        assert!(CellValue::Text("1,000".into()).to_number().is_nan());
        assert_eq!(CellValue::Bool(true).to_number(), 1.0);
    }
}
