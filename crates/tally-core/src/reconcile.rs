//! Reconciliation of extracted invoices against the standard item catalog.
//!
//! Extracted lines start unmapped. A reviewer attaches standard item ids,
//! then approves the invoice, which yields inbound inventory movements.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ReconcileError;
use crate::models::{InvoiceData, InvoiceLineItem};

/// Review state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Approved,
}

/// An extracted line plus its catalog mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLine {
    #[serde(flatten)]
    pub item: InvoiceLineItem,

    /// Standard item id, `None` until mapped.
    pub std_item_id: Option<String>,
}

/// Why stock moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerReason {
    Inbound,
}

/// One inventory ledger movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub std_item_id: Option<String>,
    pub date: NaiveDate,
    pub qty_delta: f64,
    pub reason: LedgerReason,
}

/// An invoice under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewInvoice {
    pub vendor_name: String,
    pub issue_date: String,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub lines: Vec<ReviewLine>,
}

impl From<InvoiceData> for ReviewInvoice {
    fn from(data: InvoiceData) -> Self {
        Self {
            vendor_name: data.vendor_name,
            issue_date: data.issue_date,
            total_amount: data.total_amount,
            status: InvoiceStatus::Draft,
            lines: data
                .line_items
                .into_iter()
                .map(|item| ReviewLine {
                    item,
                    std_item_id: None,
                })
                .collect(),
        }
    }
}

impl ReviewInvoice {
    /// Attach a standard item to line `index`.
    pub fn map_item(&mut self, index: usize, std_item_id: impl Into<String>) -> Result<(), ReconcileError> {
        if self.status == InvoiceStatus::Approved {
            return Err(ReconcileError::AlreadyApproved);
        }
        let count = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(ReconcileError::UnknownLine { index, count })?;

        let std_item_id = std_item_id.into();
        debug!("Mapping line {} '{}' to {}", index, line.item.raw_item_name, std_item_id);
        line.std_item_id = Some(std_item_id);
        Ok(())
    }

    /// Lines still waiting for a catalog mapping.
    pub fn unmapped_lines(&self) -> impl Iterator<Item = (usize, &ReviewLine)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.std_item_id.is_none())
    }

    /// Approve the invoice and emit one inbound movement per line.
    ///
    /// Unmapped lines still produce a movement, with no item id.
    pub fn approve(&mut self, approved_on: NaiveDate) -> Result<Vec<LedgerEntry>, ReconcileError> {
        if self.status == InvoiceStatus::Approved {
            return Err(ReconcileError::AlreadyApproved);
        }
        self.status = InvoiceStatus::Approved;

        let entries: Vec<LedgerEntry> = self
            .lines
            .iter()
            .map(|line| LedgerEntry {
                std_item_id: line.std_item_id.clone(),
                date: approved_on,
                qty_delta: line.item.qty,
                reason: LedgerReason::Inbound,
            })
            .collect();

        info!(
            "Approved invoice from '{}' with {} ledger entries",
            self.vendor_name,
            entries.len()
        );
        Ok(entries)
    }
}
