//! Workbook decoding with `calamine`.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::SalesError;
use crate::models::CellValue;

use super::{Result, Sheet, Workbook, WorkbookReader};

/// Decodes xlsx, xlsm, xlsb, xls and ods workbooks from memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineReader;

impl CalamineReader {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookReader for CalamineReader {
    fn read_workbook(&self, bytes: &[u8]) -> Result<Workbook> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| SalesError::Workbook(e.to_string()))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| SalesError::Workbook(format!("sheet '{}': {}", name, e)))?;

            // Ranges start at the first used cell; pad back to A1 so row
            // indices match the sheet.
            let (row_offset, col_offset) = range
                .start()
                .map(|(r, c)| (r as usize, c as usize))
                .unwrap_or((0, 0));

            let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
            for row in range.rows() {
                let mut cells = vec![CellValue::Empty; col_offset];
                cells.extend(row.iter().map(to_cell));
                rows.push(cells);
            }

            debug!("Decoded sheet '{}' with {} rows", name, rows.len());
            sheets.push(Sheet { name, rows });
        }

        Ok(Workbook { sheets })
    }
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if !dt.is_duration() => excel_date(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Calendar date of a date-formatted cell, using the spreadsheet's own
/// 1900 calendar (which includes the phantom 1900-02-29).
fn excel_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial > 3_000_000.0 {
        return None;
    }
    let days = serial.floor() as i64;
    let epoch = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    epoch.checked_add_signed(Duration::days(days))
}
