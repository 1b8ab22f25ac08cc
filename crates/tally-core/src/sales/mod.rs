//! POS sales export extraction.
//!
//! The workbook decoder sits behind [`WorkbookReader`] so the parser can be
//! driven by fixture sheets; [`CalamineReader`] is the production decoder.

mod calamine_reader;
mod columns;
pub mod dates;
mod parser;

pub use calamine_reader::CalamineReader;
pub use columns::ColumnMap;
pub use dates::{normalize_sale_date, serial_to_date};
pub use parser::SalesExportParser;

use crate::error::SalesError;
use crate::models::{CellValue, SalesRecord};

/// Result type for sales export operations.
pub type Result<T> = std::result::Result<T, SalesError>;

/// A decoded sheet as raw rows, indexed from the top of the sheet.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

/// A decoded workbook in sheet order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }
}

/// Trait for spreadsheet decoders.
pub trait WorkbookReader {
    /// Decode an in-memory workbook.
    fn read_workbook(&self, bytes: &[u8]) -> Result<Workbook>;
}

/// Parse a POS export with the default decoder and layout.
pub fn parse_sales_export(bytes: &[u8]) -> Result<Vec<SalesRecord>> {
    SalesExportParser::default().parse_bytes(&CalamineReader::new(), bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const DAILY_SALES: &[u8] = include_bytes!("../../tests/fixtures/daily_sales.xlsx");

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_parse_sales_export_from_xlsx() {
        let records = parse_sales_export(DAILY_SALES).unwrap();

        assert_eq!(
            records[0],
            SalesRecord {
                sale_date: date(5),
                item_code: "A001".to_string(),
                item_name: "김치찌개".to_string(),
                qty: 3.0,
                net_sales: Decimal::from(27000),
            }
        );

        let dates: Vec<(&str, NaiveDate)> = records
            .iter()
            .map(|r| (r.item_code.as_str(), r.sale_date))
            .collect();
        assert_eq!(
            dates,
            vec![
                ("A001", date(5)),
                // date-formatted cell
                ("A002", date(5)),
                // bare serial 45356 under the 1900-01-01 rule
                ("A003", date(6)),
                ("A004", date(7)),
            ]
        );
    }
}
