//! Upload validation for invoice images and POS spreadsheets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::config::{UploadPolicy, MIB};
use crate::models::InvoiceFile;

/// What the validator needs to know about an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Lowercase extension with its leading dot, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
    }
}

impl From<&InvoiceFile> for FileInfo {
    fn from(file: &InvoiceFile) -> Self {
        Self::new(file.name.clone(), file.mime_type.clone(), file.size())
    }
}

/// Why an upload was refused. The message is shown to the uploader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("file size must be {limit_mb}MB or less")]
    TooLarge { limit_mb: u64 },

    #[error("supported file types: {}", .allowed.join(", "))]
    UnsupportedType { allowed: Vec<String> },

    #[error("only {} files can be uploaded", .allowed.join(", "))]
    UnsupportedExtension { allowed: Vec<String> },
}

/// Applies one [`UploadPolicy`].
#[derive(Debug, Clone)]
pub struct FileValidator {
    policy: UploadPolicy,
}

impl FileValidator {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    /// Validator for invoice photos and scans.
    pub fn invoice() -> Self {
        Self::new(UploadPolicy::invoice())
    }

    /// Validator for POS spreadsheet exports.
    pub fn sales() -> Self {
        Self::new(UploadPolicy::sales())
    }

    /// Check a file, returning the first failing rule.
    ///
    /// Size is checked before type, so an oversized file of the wrong type
    /// reports the size limit.
    pub fn validate(&self, file: &FileInfo) -> Option<UploadRejection> {
        if file.size > self.policy.max_bytes {
            return Some(UploadRejection::TooLarge {
                limit_mb: self.policy.max_bytes / MIB,
            });
        }

        if !self.policy.allowed_mime_types.is_empty()
            && !self.policy.allowed_mime_types.iter().any(|t| *t == file.mime_type)
        {
            return Some(UploadRejection::UnsupportedType {
                allowed: self.policy.allowed_mime_types.clone(),
            });
        }

        if !self.policy.allowed_extensions.is_empty() {
            let extension = file.extension().unwrap_or_default();
            if !self.policy.allowed_extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension)) {
                return Some(UploadRejection::UnsupportedExtension {
                    allowed: self.policy.allowed_extensions.clone(),
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_invoice_image() {
        let file = FileInfo::new("statement.jpg", "image/jpeg", 2 * MIB);
        assert_eq!(FileValidator::invoice().validate(&file), None);

        let file = FileInfo::new("statement.pdf", "application/pdf", 20 * MIB);
        assert_eq!(FileValidator::invoice().validate(&file), None);
    }

    #[test]
    fn test_rejects_invoice_type() {
        let file = FileInfo::new("statement.gif", "image/gif", 1024);
        let rejection = FileValidator::invoice().validate(&file).unwrap();
        assert_eq!(
            rejection.to_string(),
            "supported file types: image/jpeg, image/png, image/webp, application/pdf"
        );
    }

    #[test]
    fn test_rejects_oversized_invoice() {
        let file = FileInfo::new("statement.png", "image/png", 20 * MIB + 1);
        assert_eq!(
            FileValidator::invoice().validate(&file),
            Some(UploadRejection::TooLarge { limit_mb: 20 })
        );
    }

    #[test]
    fn test_size_is_reported_before_type() {
        // Both rules fail; the size rule is checked first.
        let file = FileInfo::new("movie.mp4", "video/mp4", 500 * MIB);
        let rejection = FileValidator::invoice().validate(&file).unwrap();
        assert_eq!(rejection, UploadRejection::TooLarge { limit_mb: 20 });
        assert_eq!(rejection.to_string(), "file size must be 20MB or less");

        let file = FileInfo::new("report.csv", "text/csv", 11 * MIB);
        assert_eq!(
            FileValidator::sales().validate(&file),
            Some(UploadRejection::TooLarge { limit_mb: 10 })
        );
    }

    #[test]
    fn test_sales_extension_rules() {
        let validator = FileValidator::sales();

        assert_eq!(validator.validate(&FileInfo::new("daily.xlsx", "", 1024)), None);
        assert_eq!(validator.validate(&FileInfo::new("DAILY.XLS", "", 1024)), None);

        let rejection = validator
            .validate(&FileInfo::new("daily.csv", "text/csv", 1024))
            .unwrap();
        assert_eq!(rejection.to_string(), "only .xlsx, .xls files can be uploaded");
        assert!(validator.validate(&FileInfo::new("xlsx", "", 1024)).is_some());
    }

    #[test]
    fn test_from_invoice_file() {
        let file = InvoiceFile::new("a.webp", "image/webp", vec![0; 16]);
        assert_eq!(FileInfo::from(&file), FileInfo::new("a.webp", "image/webp", 16));
    }
}
