//! Vendor name extraction.

use super::patterns::VENDOR_NAME;
use super::{ExtractionMatch, FieldExtractor};

/// Vendor name field extractor.
pub struct VendorExtractor;

impl VendorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VendorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = ExtractionMatch<String>;

    /// Only the first labeled line is considered.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = VENDOR_NAME.captures(text)?;
        to_match(&caps)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        VENDOR_NAME
            .captures_iter(text)
            .filter_map(|caps| to_match(&caps))
            .collect()
    }
}

fn to_match(caps: &regex::Captures<'_>) -> Option<ExtractionMatch<String>> {
    let name = caps.get(1)?;
    let value = name.as_str().trim();
    if value.is_empty() {
        return None;
    }
    Some(ExtractionMatch::new(value.to_string(), &caps[0]).with_position(name.start(), name.end()))
}

/// Extract the vendor name from invoice text.
pub fn extract_vendor_name(text: &str) -> Option<String> {
    VendorExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_vendor() {
        assert_eq!(
            extract_vendor_name("거래명세서\n거래처: 한우유통(주)\n발행일: 2024-03-05"),
            Some("한우유통(주)".to_string())
        );
    }

    #[test]
    fn test_each_label() {
        assert_eq!(extract_vendor_name("회사명 : 싱싱수산  "), Some("싱싱수산".to_string()));
        assert_eq!(extract_vendor_name("업체:청과마을"), Some("청과마을".to_string()));
    }

    #[test]
    fn test_first_label_wins() {
        let text = "업체: 첫번째상회\n거래처: 두번째상회";
        assert_eq!(extract_vendor_name(text), Some("첫번째상회".to_string()));
        assert_eq!(VendorExtractor::new().extract_all(text).len(), 2);
    }

    #[test]
    fn test_no_label() {
        assert_eq!(extract_vendor_name("소고기 등심 5 kg 50000 250000"), None);
        assert_eq!(extract_vendor_name(""), None);
    }

    #[test]
    fn test_label_at_end_of_text() {
        assert_eq!(extract_vendor_name("거래처:   "), None);
    }
}
