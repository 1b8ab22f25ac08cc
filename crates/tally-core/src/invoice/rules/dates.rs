//! Issue date extraction for invoices.
//!
//! The date is returned exactly as printed. `YYYY/MM/DD` is not rewritten
//! to hyphens here, unlike POS sale dates.

use super::patterns::ISSUE_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Issue date field extractor.
pub struct IssueDateExtractor;

impl IssueDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IssueDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IssueDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ISSUE_DATE
            .find_iter(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end()))
            .collect()
    }
}

/// Extract the first date-like token from invoice text.
pub fn extract_issue_date(text: &str) -> Option<String> {
    IssueDateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphen_date() {
        assert_eq!(extract_issue_date("발행일: 2024-03-05"), Some("2024-03-05".to_string()));
    }

    #[test]
    fn test_slash_date_is_kept_as_printed() {
        assert_eq!(extract_issue_date("일자 2024/03/05"), Some("2024/03/05".to_string()));
    }

    #[test]
    fn test_first_date_wins() {
        let text = "발행일 2024-03-05\n납품일 2024-03-07";
        assert_eq!(extract_issue_date(text), Some("2024-03-05".to_string()));
        assert_eq!(IssueDateExtractor::new().extract_all(text).len(), 2);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_issue_date("24.03.05"), None);
        assert_eq!(extract_issue_date("2024-3-5"), None);
    }
}
