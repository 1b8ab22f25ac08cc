//! Total amount extraction for invoices.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::TOTAL_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Labeled total amount extractor.
pub struct TotalAmountExtractor;

impl TotalAmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalAmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalAmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in TOTAL_AMOUNT.captures_iter(text) {
            if let Some(amount) = parse_won_amount(&caps[1]) {
                if let Some(full_match) = caps.get(0) {
                    results.push(
                        ExtractionMatch::new(amount, full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract the first labeled total from invoice text.
pub fn extract_total_amount(text: &str) -> Option<Decimal> {
    TotalAmountExtractor::new().extract(text).map(|m| m.value)
}

/// Parse a whole-won amount with optional thousands separators ("150,000").
pub fn parse_won_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
