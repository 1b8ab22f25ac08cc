//! Vendor invoice data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate result of one invoice extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    /// Vendor name, or the configured "unconfirmed" sentinel.
    pub vendor_name: String,

    /// Issue date as found in the text (`YYYY-MM-DD` or `YYYY/MM/DD`),
    /// or the extraction date.
    pub issue_date: String,

    /// Declared invoice total, 0 when not found.
    pub total_amount: Decimal,

    /// Line items in source line order.
    pub line_items: Vec<InvoiceLineItem>,
}

/// One parsed row of a vendor invoice.
///
/// `qty * unit_price` is not checked against `line_total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Item name as printed, not mapped to the catalog.
    pub raw_item_name: String,

    /// Quantity, fractional for weights.
    pub qty: f64,

    /// Unit of measure code.
    pub uom: String,

    pub unit_price: Decimal,

    pub line_total: Decimal,
}

/// An uploaded invoice document handed to the extractor.
#[derive(Debug, Clone)]
pub struct InvoiceFile {
    /// Original file name.
    pub name: String,

    /// Declared MIME type.
    pub mime_type: String,

    /// File contents.
    pub bytes: Vec<u8>,
}

impl InvoiceFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Whether the declared type is an image that OCR can read.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
