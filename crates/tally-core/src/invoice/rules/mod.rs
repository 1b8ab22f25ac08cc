//! Rule-based field extractors for Korean vendor invoices.
//!
//! Every field is matched independently over the OCR transcript. A field
//! that does not match yields `None`; defaults are applied by the parser.

pub mod amounts;
pub mod dates;
pub mod line_items;
pub mod patterns;
pub mod vendor;

pub use amounts::{extract_total_amount, parse_won_amount, TotalAmountExtractor};
pub use dates::{extract_issue_date, IssueDateExtractor};
pub use line_items::{extract_line_items, LineItemExtractor};
pub use vendor::{extract_vendor_name, VendorExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
