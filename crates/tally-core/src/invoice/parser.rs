//! Best-effort invoice parser over OCR transcripts.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::InvoiceError;
use crate::models::config::InvoiceConfig;
use crate::models::{InvoiceData, InvoiceFile};
use crate::ocr::OcrEngine;

use super::rules::{
    FieldExtractor, IssueDateExtractor, LineItemExtractor, TotalAmountExtractor, VendorExtractor,
};
use super::{InvoiceExtractor, Result};

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: InvoiceData,
    /// Raw transcript.
    pub raw_text: String,
    /// Fields that fell back to their defaults.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Invoice parser applying each field rule independently.
///
/// Parsing never fails: a field without a match takes its configured
/// default, a line without a full match is dropped.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTextParser {
    config: InvoiceConfig,
    today: Option<NaiveDate>,
}

impl InvoiceTextParser {
    pub fn new(config: InvoiceConfig) -> Self {
        Self { config, today: None }
    }

    /// Fix the fallback issue date instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn fallback_date(&self) -> String {
        self.today
            .unwrap_or_else(|| Utc::now().date_naive())
            .format("%Y-%m-%d")
            .to_string()
    }

    /// Parse a transcript, reporting which fields were defaulted.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing invoice from {} characters of text", text.len());

        let vendor_name = match VendorExtractor::new().extract(text) {
            Some(m) => m.value,
            None => {
                warnings.push("Could not extract vendor name".to_string());
                self.config.default_vendor_name.clone()
            }
        };

        let issue_date = match IssueDateExtractor::new().extract(text) {
            Some(m) => m.value,
            None => {
                warnings.push("Could not extract issue date".to_string());
                self.fallback_date()
            }
        };

        let total_amount = match TotalAmountExtractor::new().extract(text) {
            Some(m) => m.value,
            None => {
                warnings.push("Could not extract total amount".to_string());
                Decimal::ZERO
            }
        };

        let line_items = LineItemExtractor::new()
            .with_default_uom(self.config.default_uom.clone())
            .extract_all(text);
        if line_items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        debug!(
            "Extracted invoice from '{}' dated {} with {} items, total {}",
            vendor_name,
            issue_date,
            line_items.len(),
            total_amount
        );

        ExtractionResult {
            invoice: InvoiceData {
                vendor_name,
                issue_date,
                total_amount,
                line_items,
            },
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl InvoiceExtractor for InvoiceTextParser {
    fn extract(&self, file: &InvoiceFile, ocr: &dyn OcrEngine) -> Result<InvoiceData> {
        if !file.is_image() {
            return Err(InvoiceError::UnsupportedFormat {
                mime_type: file.mime_type.clone(),
            });
        }

        info!("Running OCR on '{}' ({} bytes)", file.name, file.size());
        let text = ocr.recognize(&file.bytes, &self.config.ocr_languages)?;

        Ok(self.parse(&text).invoice)
    }

    fn extract_from_text(&self, text: &str) -> InvoiceData {
        self.parse(text).invoice
    }
}
