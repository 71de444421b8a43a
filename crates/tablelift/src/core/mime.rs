//! Document format detection.
//!
//! Uploads are identified by their magic bytes, never by the client-supplied
//! filename or content type. Only formats the recognition service accepts for
//! synchronous analysis get through.

use crate::{Result, TableliftError};
use serde::{Deserialize, Serialize};

pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const PNG_MIME_TYPE: &str = "image/png";
pub const TIFF_MIME_TYPE: &str = "image/tiff";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A document format the recognition service can analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Jpeg,
    Png,
    Tiff,
    Pdf,
}

impl DocumentFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => JPEG_MIME_TYPE,
            Self::Png => PNG_MIME_TYPE,
            Self::Tiff => TIFF_MIME_TYPE,
            Self::Pdf => PDF_MIME_TYPE,
        }
    }

    fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            JPEG_MIME_TYPE => Some(Self::Jpeg),
            PNG_MIME_TYPE => Some(Self::Png),
            TIFF_MIME_TYPE => Some(Self::Tiff),
            PDF_MIME_TYPE => Some(Self::Pdf),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Detect the format of `content` from its leading bytes.
///
/// # Errors
///
/// - `TableliftError::Validation` for empty input
/// - `TableliftError::UnsupportedFormat` for anything that is not JPEG, PNG, TIFF or PDF,
///   including bytes `infer` cannot identify
pub fn sniff_document(content: &[u8]) -> Result<DocumentFormat> {
    if content.is_empty() {
        return Err(TableliftError::validation("Uploaded document is empty"));
    }

    match infer::get(content) {
        Some(kind) => DocumentFormat::from_mime_type(kind.mime_type())
            .ok_or_else(|| TableliftError::UnsupportedFormat(kind.mime_type().to_string())),
        None => Err(TableliftError::UnsupportedFormat(
            "unrecognized document bytes".to_string(),
        )),
    }
}
