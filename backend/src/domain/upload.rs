//! Typed file uploads and the receipts returned for them.

use std::collections::BTreeMap;

/// Rows included in a tabular preview.
pub const PREVIEW_ROWS: usize = 5;
const FILE_NAME_MAX: usize = 255;
const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("Invalid file type")]
    UnsupportedType { content_type: String },
    #[error("file name must be a single path component")]
    InvalidFileName,
    #[error("uploaded file is empty")]
    EmptyBody,
}

impl UploadValidationError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "contentType",
            Self::InvalidFileName => "fileName",
            Self::EmptyBody => "body",
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::InvalidFileName => "invalid_file_name",
            Self::EmptyBody => "empty_body",
        }
    }
}

/// Accepted upload families, keyed off the declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Csv,
    Excel,
    Image,
}

impl UploadKind {
    /// Classify a MIME type; parameters such as `; charset=utf-8` are ignored.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(Self::Pdf),
            "text/csv" => Some(Self::Csv),
            "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(Self::Excel)
            }
            "image/jpeg" | "image/jpg" | "image/png" | "image/webp" => Some(Self::Image),
            _ => None,
        }
    }

    /// Directory under the upload root that receives this kind.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Pdf => "pdf_files",
            Self::Csv | Self::Excel => "csv_files",
            Self::Image => "image_files",
        }
    }
}

/// A client-supplied file name that is safe to join onto a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFileName(String);

impl UploadFileName {
    pub fn new(raw: &str) -> Result<Self, UploadValidationError> {
        let trimmed = raw.trim();
        let acceptable = !trimmed.is_empty()
            && trimmed.len() <= FILE_NAME_MAX
            && !trimmed.starts_with('.')
            && !trimmed.contains(['/', '\\', '\0'])
            && !trimmed.chars().any(char::is_control);
        if acceptable {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(UploadValidationError::InvalidFileName)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated upload ready to be stored.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: UploadFileName,
    pub content_type: String,
    pub kind: UploadKind,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn try_new(
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadValidationError> {
        let kind = UploadKind::from_content_type(content_type).ok_or_else(|| {
            UploadValidationError::UnsupportedType {
                content_type: content_type.to_owned(),
            }
        })?;
        let name = UploadFileName::new(file_name)?;
        if bytes.is_empty() {
            return Err(UploadValidationError::EmptyBody);
        }
        Ok(Self {
            file_name: name,
            content_type: content_type.to_owned(),
            kind,
            bytes,
        })
    }
}

/// Column names and the first rows of a tabular file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

/// Summary returned after a file has been stored.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadReceipt {
    Document {
        file_name: String,
        content_type: String,
        file_path: String,
        size_mb: f64,
    },
    Table {
        file_name: String,
        content_type: String,
        file_path: String,
        preview: TablePreview,
    },
    Stored {
        file_name: String,
        content_type: String,
        file_path: String,
    },
}

/// Size in mebibytes rounded to two decimals.
#[must_use]
pub fn size_in_megabytes(byte_count: usize) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "upload sizes stay far below 2^52 bytes"
    )]
    let megabytes = byte_count as f64 / BYTES_PER_MEGABYTE;
    (megabytes * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("application/pdf", Some(UploadKind::Pdf))]
    #[case("text/csv; charset=utf-8", Some(UploadKind::Csv))]
    #[case("IMAGE/PNG", Some(UploadKind::Image))]
    #[case("image/jpg", Some(UploadKind::Image))]
    #[case(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some(UploadKind::Excel)
    )]
    #[case("application/zip", None)]
    #[case("", None)]
    fn classifies_content_types(#[case] content_type: &str, #[case] expected: Option<UploadKind>) {
        assert_eq!(UploadKind::from_content_type(content_type), expected);
    }

    #[rstest]
    #[case("report.pdf", true)]
    #[case("quarterly results.csv", true)]
    #[case("../etc/passwd", false)]
    #[case("nested/file.png", false)]
    #[case("windows\\path.png", false)]
    #[case(".hidden", false)]
    #[case("..", false)]
    #[case("  ", false)]
    fn file_names_must_be_plain(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(UploadFileName::new(raw).is_ok(), accepted);
    }

    #[rstest]
    fn rejects_empty_body() {
        let err = Upload::try_new("a.pdf", "application/pdf", Vec::new()).expect_err("empty");
        assert_eq!(err, UploadValidationError::EmptyBody);
    }

    #[rstest]
    fn rejects_unknown_type_before_name() {
        let err = Upload::try_new("../x", "application/zip", vec![1]).expect_err("bad type");
        assert_eq!(err.code(), "unsupported_type");
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(1_048_576, 1.0)]
    #[case(1_572_864, 1.5)]
    #[case(10_000, 0.01)]
    fn sizes_round_to_two_decimals(#[case] bytes: usize, #[case] expected: f64) {
        assert!((size_in_megabytes(bytes) - expected).abs() < f64::EPSILON);
    }
}
