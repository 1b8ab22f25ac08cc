//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, InvoiceTextParser};

use crate::error::InvoiceError;
use crate::models::{InvoiceData, InvoiceFile};
use crate::ocr::OcrEngine;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, InvoiceError>;

/// Trait for invoice field extractors.
pub trait InvoiceExtractor {
    /// Run OCR on an invoice image and extract its fields.
    ///
    /// Fails only for non-image input or when OCR itself fails.
    fn extract(&self, file: &InvoiceFile, ocr: &dyn OcrEngine) -> Result<InvoiceData>;

    /// Extract invoice fields from an OCR transcript.
    fn extract_from_text(&self, text: &str) -> InvoiceData;
}

/// Extract an invoice with the default configuration.
pub fn extract_invoice_data(file: &InvoiceFile, ocr: &dyn OcrEngine) -> Result<InvoiceData> {
    InvoiceTextParser::default().extract(file, ocr)
}
