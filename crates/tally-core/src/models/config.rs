//! Configuration structures for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Vendor name used when no vendor label is found on an invoice ("unconfirmed").
pub const DEFAULT_VENDOR_NAME: &str = "미확인";

/// Unit of measure used when a line item carries no recognized unit.
pub const DEFAULT_UOM: &str = "ea";

/// Zero-based index of the header row in the supported POS export format.
pub const DEFAULT_HEADER_ROW: usize = 3;

/// 1 MiB.
pub const MIB: u64 = 1024 * 1024;

/// Main configuration for the tally pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// POS sales export parsing.
    pub sales: SalesConfig,

    /// Invoice text extraction.
    pub invoice: InvoiceConfig,

    /// Upload constraints per document kind.
    pub uploads: UploadConfig,

    /// Native OCR backend.
    pub ocr: OcrConfig,
}

/// Spreadsheet layout of the POS daily item sales export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    /// Zero-based row holding the column labels.
    pub header_row: usize,

    /// Minimum number of rows (header block plus at least one data row).
    pub min_rows: usize,

    /// Accepted header labels per logical column.
    pub columns: ColumnLabels,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            header_row: DEFAULT_HEADER_ROW,
            min_rows: DEFAULT_HEADER_ROW + 2,
            columns: ColumnLabels::default(),
        }
    }
}

impl SalesConfig {
    /// First row after the header.
    pub fn first_data_row(&self) -> usize {
        self.header_row + 1
    }
}

/// Logical columns every POS export must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesColumn {
    ItemCode,
    ItemName,
    SaleDate,
    Qty,
    NetSales,
}

impl SalesColumn {
    /// All columns in resolution order.
    pub const ALL: [SalesColumn; 5] = [
        SalesColumn::ItemCode,
        SalesColumn::ItemName,
        SalesColumn::SaleDate,
        SalesColumn::Qty,
        SalesColumn::NetSales,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SalesColumn::ItemCode => "item_code",
            SalesColumn::ItemName => "item_name",
            SalesColumn::SaleDate => "sale_date",
            SalesColumn::Qty => "qty",
            SalesColumn::NetSales => "net_sales",
        }
    }
}

/// Header label synonyms. Earlier entries in each list take priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub item_code: Vec<String>,
    pub item_name: Vec<String>,
    pub sale_date: Vec<String>,
    pub qty: Vec<String>,
    pub net_sales: Vec<String>,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        fn labels(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            item_code: labels(&["상품코드", "코드"]),
            item_name: labels(&["상품명", "품목"]),
            sale_date: labels(&["일자", "날짜"]),
            qty: labels(&["수량"]),
            net_sales: labels(&["실매출액", "매출액"]),
        }
    }
}

impl ColumnLabels {
    /// Labels accepted for a logical column.
    pub fn for_column(&self, column: SalesColumn) -> &[String] {
        match column {
            SalesColumn::ItemCode => &self.item_code,
            SalesColumn::ItemName => &self.item_name,
            SalesColumn::SaleDate => &self.sale_date,
            SalesColumn::Qty => &self.qty,
            SalesColumn::NetSales => &self.net_sales,
        }
    }
}

/// Defaults applied when invoice fields cannot be recovered from OCR text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    /// Vendor name when no vendor label is present.
    pub default_vendor_name: String,

    /// Unit of measure when a line has no recognized unit.
    pub default_uom: String,

    /// Language hints passed to the OCR engine.
    pub ocr_languages: Vec<String>,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            default_vendor_name: DEFAULT_VENDOR_NAME.to_string(),
            default_uom: DEFAULT_UOM.to_string(),
            ocr_languages: vec!["kor".to_string(), "eng".to_string()],
        }
    }
}

/// Upload policies per document kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub invoice: UploadPolicy,
    pub sales: UploadPolicy,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            invoice: UploadPolicy::invoice(),
            sales: UploadPolicy::sales(),
        }
    }
}

/// Type and size constraints for one upload path.
///
/// An empty allow-list disables that check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Largest accepted file, in bytes.
    pub max_bytes: u64,

    /// Accepted MIME types (exact match).
    pub allowed_mime_types: Vec<String>,

    /// Accepted file name extensions, lowercase with leading dot.
    pub allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    /// Vendor invoice photos and scans.
    pub fn invoice() -> Self {
        Self {
            max_bytes: 20 * MIB,
            allowed_mime_types: ["image/jpeg", "image/png", "image/webp", "application/pdf"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_extensions: Vec::new(),
        }
    }

    /// POS spreadsheet exports.
    pub fn sales() -> Self {
        Self {
            max_bytes: 10 * MIB,
            allowed_mime_types: Vec::new(),
            allowed_extensions: vec![".xlsx".to_string(), ".xls".to_string()],
        }
    }
}

/// Model files for the native OCR backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "korean_rec.onnx".to_string(),
            dictionary: "korean_dict.txt".to_string(),
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.model_dir.join(file_name)
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_export_format() {
        let config = TallyConfig::default();
        assert_eq!(config.sales.header_row, 3);
        assert_eq!(config.sales.min_rows, 5);
        assert_eq!(config.sales.first_data_row(), 4);
        assert_eq!(config.invoice.default_vendor_name, "미확인");
        assert_eq!(config.invoice.default_uom, "ea");
        assert_eq!(config.uploads.invoice.max_bytes, 20 * 1024 * 1024);
        assert_eq!(config.uploads.sales.max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: TallyConfig =
            serde_json::from_str(r#"{"sales": {"header_row": 0}}"#).unwrap();
        assert_eq!(config.sales.header_row, 0);
        assert_eq!(config.sales.columns.qty, vec!["수량".to_string()]);
        assert_eq!(config.invoice.ocr_languages, vec!["kor", "eng"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = TallyConfig::default();
        config.invoice.default_vendor_name = "unknown".to_string();
        config.save(&path).unwrap();

        let loaded = TallyConfig::from_file(&path).unwrap();
        assert_eq!(loaded.invoice.default_vendor_name, "unknown");
    }
}
