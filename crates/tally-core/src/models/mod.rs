//! Data models shared by the extractors.

pub mod config;
pub mod invoice;
pub mod sales;

pub use config::{SalesColumn, TallyConfig};
pub use invoice::{InvoiceData, InvoiceFile, InvoiceLineItem};
pub use sales::{CellValue, SalesRecord};
