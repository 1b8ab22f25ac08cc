//! POS daily item sales export parser.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::SalesError;
use crate::models::config::SalesConfig;
use crate::models::{CellValue, SalesRecord};

use super::columns::ColumnMap;
use super::dates::{normalize_sale_date, parse_iso_date};
use super::{Result, Workbook, WorkbookReader};

/// Maps the rows of a POS export to [`SalesRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct SalesExportParser {
    config: SalesConfig,
}

impl SalesExportParser {
    pub fn new(config: SalesConfig) -> Self {
        Self { config }
    }

    /// Decode `bytes` with `reader` and parse its first sheet.
    pub fn parse_bytes(&self, reader: &dyn WorkbookReader, bytes: &[u8]) -> Result<Vec<SalesRecord>> {
        info!("Parsing sales export from {} bytes", bytes.len());
        let workbook = reader.read_workbook(bytes)?;
        self.parse_workbook(&workbook)
    }

    /// Parse the first sheet of a decoded workbook.
    pub fn parse_workbook(&self, workbook: &Workbook) -> Result<Vec<SalesRecord>> {
        let sheet = workbook.first_sheet().ok_or(SalesError::NoSheet)?;
        debug!("Using sheet '{}' with {} rows", sheet.name, sheet.rows.len());
        self.parse_rows(&sheet.rows)
    }

    /// Parse raw rows. Row `header_row` holds the labels, data follows it.
    pub fn parse_rows(&self, rows: &[Vec<CellValue>]) -> Result<Vec<SalesRecord>> {
        if rows.len() < self.config.min_rows || rows.len() <= self.config.header_row {
            return Err(SalesError::InsufficientData {
                rows: rows.len(),
                required: self.config.min_rows.max(self.config.first_data_row() + 1),
            });
        }

        let columns = ColumnMap::resolve(&rows[self.config.header_row], &self.config.columns)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in rows.iter().enumerate().skip(self.config.first_data_row()) {
            match parse_row(row, &columns) {
                Some(record) => records.push(record),
                None => {
                    debug!("Skipping row {}", index);
                    skipped += 1;
                }
            }
        }

        if records.is_empty() {
            return Err(SalesError::NoRecords);
        }

        info!("Parsed {} sales records ({} rows skipped)", records.len(), skipped);
        Ok(records)
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

fn parse_row(row: &[CellValue], columns: &ColumnMap) -> Option<SalesRecord> {
    let cell = |index: usize| row.get(index).unwrap_or(&EMPTY_CELL);

    let code_cell = cell(columns.item_code);
    let date_cell = cell(columns.sale_date);
    if code_cell.is_blank() || date_cell.is_blank() {
        return None;
    }

    let sale_date = parse_iso_date(&normalize_sale_date(date_cell))?;

    let item_code = code_cell.to_text().trim().to_string();
    if item_code.is_empty() {
        return None;
    }
    let item_name = cell(columns.item_name).to_text().trim().to_string();

    let qty = cell(columns.qty).to_number();
    let net_sales = cell(columns.net_sales).to_number();
    if qty.is_nan() || net_sales.is_nan() {
        return None;
    }

    Some(SalesRecord {
        sale_date,
        item_code,
        item_name,
        qty,
        net_sales: Decimal::from_f64(net_sales)?,
    })
}
