//! Core library for restaurant back-office ingestion.
//!
//! This crate provides:
//! - POS spreadsheet export parsing into daily item sales records
//! - Best-effort field extraction from OCR'd supplier invoices
//! - Upload validation for invoice images and spreadsheets
//! - Invoice reconciliation and profit-and-loss derivation

pub mod error;
pub mod models;
pub mod sales;
pub mod ocr;
pub mod invoice;
pub mod upload;
pub mod reconcile;
pub mod pl;

pub use error::{InvoiceError, OcrError, ReconcileError, Result, SalesError, TallyError};
pub use models::{CellValue, InvoiceData, InvoiceFile, InvoiceLineItem, SalesRecord, TallyConfig};
pub use sales::{parse_sales_export, CalamineReader, SalesExportParser, WorkbookReader};
pub use ocr::{OcrEngine, PrerecognizedText, TextBox};
#[cfg(feature = "native")]
pub use ocr::OnnxOcrEngine;
pub use invoice::{extract_invoice_data, ExtractionResult, InvoiceExtractor, InvoiceTextParser};
pub use upload::{FileInfo, FileValidator, UploadRejection};
pub use reconcile::{InvoiceStatus, LedgerEntry, ReviewInvoice};
pub use pl::{pl_report, Period, PlReport};
