//! Error types for tablelift.
//!
//! Every fallible operation in the crate returns [`Result`], whose error type is
//! [`TableliftError`]. The variants follow the request lifecycle:
//!
//! - `Validation` / `UnsupportedFormat` - the caller sent something we cannot use
//!   (no file, empty file, a format the recognition service rejects, bad config)
//! - `NoTablesFound` - recognition succeeded but the document contains no tables
//! - `Structure` - the recognition response is not a closed, well-formed block graph
//! - `Recognition` - the recognition service failed, was unreachable, or answered garbage
//! - `Io` - file system errors; these always bubble up unchanged
//!
//! [`TableliftError::is_client_error`] tells callers which side of the wire is at fault,
//! which the HTTP layer maps onto 4xx/5xx.
//!
//! # Example
//!
//! ```rust
//! use tablelift::{Result, TableliftError};
//!
//! fn read_document(path: &str) -> Result<Vec<u8>> {
//!     let bytes = std::fs::read(path)?;
//!     if bytes.is_empty() {
//!         return Err(TableliftError::validation(format!("Document is empty: {}", path)));
//!     }
//!     Ok(bytes)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `TableliftError`.
pub type Result<T> = std::result::Result<T, TableliftError>;

/// Main error type for all tablelift operations.
#[derive(Debug, Error)]
pub enum TableliftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No tables found in the document")]
    NoTablesFound,

    #[error("Structural error: {message}")]
    Structure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Recognition error: {message}")]
    Recognition {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for TableliftError {
    fn from(err: serde_json::Error) -> Self {
        TableliftError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl TableliftError {
    error_constructor!(validation, Validation);
    error_constructor!(structure, Structure);
    error_constructor!(recognition, Recognition);
    error_constructor!(serialization, Serialization);

    /// Whether the failure was caused by the caller's input rather than by the
    /// service or its collaborators.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::UnsupportedFormat(_) | Self::NoTablesFound
        )
    }

    /// Short, stable name of the variant, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "IoError",
            Self::Validation { .. } => "ValidationError",
            Self::UnsupportedFormat(_) => "UnsupportedFormatError",
            Self::NoTablesFound => "NoTablesFoundError",
            Self::Structure { .. } => "StructureError",
            Self::Recognition { .. } => "RecognitionError",
            Self::Serialization { .. } => "SerializationError",
            Self::Other(_) => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TableliftError = io_err.into();
        assert!(matches!(err, TableliftError::Io(_)));
        assert!(err.to_string().contains("IO error"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_validation_error() {
        let err = TableliftError::validation("No file part in the request");
        assert_eq!(err.to_string(), "Validation error: No file part in the request");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_validation_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad param");
        let err = TableliftError::validation_with_source("invalid input", source);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_no_tables_found_is_client_error() {
        let err = TableliftError::NoTablesFound;
        assert_eq!(err.to_string(), "No tables found in the document");
        assert!(err.is_client_error());
        assert_eq!(err.kind(), "NoTablesFoundError");
    }

    #[test]
    fn test_structure_error_is_server_error() {
        let err = TableliftError::structure("Block 'a' references missing child 'b'");
        assert_eq!(err.to_string(), "Structural error: Block 'a' references missing child 'b'");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_recognition_error_with_source() {
        let source = std::io::Error::other("connection reset");
        let err = TableliftError::recognition_with_source("Textract request failed", source);
        assert_eq!(err.to_string(), "Recognition error: Textract request failed");
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_unsupported_format_error() {
        let err = TableliftError::UnsupportedFormat("application/zip".to_string());
        assert_eq!(err.to_string(), "Unsupported format: application/zip");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TableliftError = json_err.into();
        assert!(matches!(err, TableliftError::Serialization { .. }));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/file.txt")?;
            Ok(content)
        }

        let result = read_file();
        assert!(matches!(result.unwrap_err(), TableliftError::Io(_)));
    }
}
