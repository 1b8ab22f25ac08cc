//! Common regex patterns for Korean invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Vendor label (회사명 / 업체 / 거래처), rest of the line is the name
    pub static ref VENDOR_NAME: Regex = Regex::new(
        r"(?:회사명|업체|거래처)[\s:]*([^\n]+)"
    ).unwrap();

    // First YYYY-MM-DD or YYYY/MM/DD anywhere
    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"([0-9]{4}[-/][0-9]{2}[-/][0-9]{2})"
    ).unwrap();

    // Total label (합계 / 총액 / 금액) followed by a won amount: 150,000원
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?:합계|총액|금액)[\s:]*([0-9]+(?:,[0-9]{3})*)\s*원?"
    ).unwrap();

    // name, qty, optional unit, unit price, line total: "소고기 등심 5 kg 50,000 250,000"
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"(?i)(.+?)\s+([0-9]+(?:\.[0-9]+)?)\s*(kg|g|ea|box|l|ml|개|박스)?\s*([0-9]+(?:,[0-9]{3})*)\s*([0-9]+(?:,[0-9]{3})*)"
    ).unwrap();

    pub static ref HAS_DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
}
