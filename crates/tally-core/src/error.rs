//! Error types for the tally-core library.

use thiserror::Error;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// POS sales export could not be interpreted.
    #[error("sales export error: {0}")]
    Sales(#[from] SalesError),

    /// Invoice extraction error.
    #[error("invoice error: {0}")]
    Invoice(#[from] InvoiceError),

    /// Invoice reconciliation error.
    #[error("reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Format errors raised by the spreadsheet sales extractor.
///
/// Every variant is fatal for a single upload: nothing from that workbook
/// should be persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SalesError {
    /// The workbook bytes could not be decoded.
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    /// The workbook has no sheets.
    #[error("no sheet found in workbook")]
    NoSheet,

    /// Not enough rows for the header block plus one data row.
    #[error("insufficient data: {rows} rows found, at least {required} required")]
    InsufficientData { rows: usize, required: usize },

    /// One or more required header labels could not be found.
    #[error("required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Every data row was skipped.
    #[error("no records produced from sales export")]
    NoRecords,
}

/// Errors related to invoice extraction.
#[derive(Error, Debug)]
pub enum InvoiceError {
    /// Input is not an image; nothing was sent to OCR.
    #[error("unsupported invoice format '{mime_type}': please upload an image file (JPEG, PNG, WebP)")]
    UnsupportedFormat { mime_type: String },

    /// The OCR collaborator failed.
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Image bytes could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Errors raised while mapping and approving invoices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// The referenced line does not exist on the invoice.
    #[error("invoice has no line {index} ({count} lines)")]
    UnknownLine { index: usize, count: usize },

    /// The invoice was already approved.
    #[error("invoice is already approved")]
    AlreadyApproved,
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_names_columns() {
        let err = SalesError::MissingColumns(vec!["item_code".into(), "qty".into()]);
        assert_eq!(err.to_string(), "required columns not found: item_code, qty");
    }

    #[test]
    fn test_unsupported_format_asks_for_image() {
        let err = InvoiceError::UnsupportedFormat {
            mime_type: "application/pdf".into(),
        };
        assert!(err.to_string().contains("please upload an image"));
    }
}
