//! Line item extraction for invoices.
//!
//! Each transcript line is tried against a single composite pattern:
//! name, quantity, optional unit, unit price, line total. Lines that do not
//! match as a whole are dropped.

use std::str::FromStr;

use tracing::debug;

use crate::models::config::DEFAULT_UOM;
use crate::models::InvoiceLineItem;

use super::amounts::parse_won_amount;
use super::patterns::{HAS_DIGIT, LINE_ITEM};
use super::FieldExtractor;

/// Line item extractor.
pub struct LineItemExtractor {
    default_uom: String,
}

impl LineItemExtractor {
    pub fn new() -> Self {
        Self {
            default_uom: DEFAULT_UOM.to_string(),
        }
    }

    /// Set the unit used when a line carries no recognized unit.
    pub fn with_default_uom(mut self, uom: impl Into<String>) -> Self {
        self.default_uom = uom.into();
        self
    }

    /// Parse a single transcript line.
    pub fn parse_line(&self, line: &str) -> Option<InvoiceLineItem> {
        if line.trim().is_empty() || !HAS_DIGIT.is_match(line) {
            return None;
        }

        let caps = LINE_ITEM.captures(line)?;

        let qty = f64::from_str(&caps[2]).ok()?;
        let uom = caps
            .get(3)
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_else(|| self.default_uom.clone());
        let unit_price = parse_won_amount(&caps[4])?;
        let line_total = parse_won_amount(&caps[5])?;

        Some(InvoiceLineItem {
            raw_item_name: caps[1].trim().to_string(),
            qty,
            uom,
            unit_price,
            line_total,
        })
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = InvoiceLineItem;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        text.lines().find_map(|line| self.parse_line(line))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut items = Vec::new();

        for line in text.lines() {
            if let Some(item) = self.parse_line(line) {
                debug!("Line item '{}' x {} {}", item.raw_item_name, item.qty, item.uom);
                items.push(item);
            }
        }

        items
    }
}

/// Extract all line items, in transcript order, with the default unit.
pub fn extract_line_items(text: &str) -> Vec<InvoiceLineItem> {
    LineItemExtractor::new().extract_all(text)
}
