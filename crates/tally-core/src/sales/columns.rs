//! Header row resolution for POS exports.

use tracing::debug;

use crate::error::SalesError;
use crate::models::config::{ColumnLabels, SalesColumn};
use crate::models::CellValue;

/// Cell indices of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub item_code: usize,
    pub item_name: usize,
    pub sale_date: usize,
    pub qty: usize,
    pub net_sales: usize,
}

impl ColumnMap {
    /// Resolve every required column from the header row.
    ///
    /// Each column takes the first cell containing any of its labels.
    pub fn resolve(header: &[CellValue], labels: &ColumnLabels) -> Result<Self, SalesError> {
        let header_text: Vec<String> = header.iter().map(CellValue::to_text).collect();

        let mut resolved = [None; 5];
        let mut missing = Vec::new();

        for (slot, column) in resolved.iter_mut().zip(SalesColumn::ALL) {
            *slot = find_column(&header_text, labels.for_column(column));
            match *slot {
                Some(index) => debug!("Column {} resolved to index {}", column.name(), index),
                None => missing.push(column.name().to_string()),
            }
        }

        match resolved {
            [Some(item_code), Some(item_name), Some(sale_date), Some(qty), Some(net_sales)] => {
                Ok(Self {
                    item_code,
                    item_name,
                    sale_date,
                    qty,
                    net_sales,
                })
            }
            _ => Err(SalesError::MissingColumns(missing)),
        }
    }
}

fn find_column(header: &[String], labels: &[String]) -> Option<usize> {
    header
        .iter()
        .position(|cell| labels.iter().any(|label| cell.contains(label.as_str())))
}
