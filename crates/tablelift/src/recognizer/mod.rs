//! Recognition service seam.
//!
//! [`TableRecognizer`] is the only way the rest of the crate talks to the
//! document-analysis service. The production implementation is
//! [`TextractClient`]; tests and offline tools supply their own.
//!
//! A recognizer is built once at startup and shared as `Arc<dyn TableRecognizer>`
//! across requests, so implementations must be `Send + Sync` and hold no
//! per-request state.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use tablelift::Result;
//! use tablelift::blocks::AnalyzeDocumentResponse;
//! use tablelift::recognizer::TableRecognizer;
//!
//! /// Replays a response captured earlier.
//! struct Replay(AnalyzeDocumentResponse);
//!
//! #[async_trait]
//! impl TableRecognizer for Replay {
//!     fn name(&self) -> &str {
//!         "replay"
//!     }
//!
//!     async fn analyze(&self, _document: &[u8]) -> Result<AnalyzeDocumentResponse> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::Result;
use crate::blocks::AnalyzeDocumentResponse;

#[cfg(feature = "textract")]
pub mod sigv4;
#[cfg(feature = "textract")]
mod textract;

#[cfg(feature = "textract")]
pub use textract::TextractClient;

/// A document-analysis service that returns table blocks.
#[async_trait]
pub trait TableRecognizer: Send + Sync {
    /// Short identifier reported by `/info` and in logs.
    fn name(&self) -> &str;

    /// Analyze one document and return the service's block graph.
    ///
    /// `document` holds the raw uploaded bytes, already checked to be a supported format.
    ///
    /// # Errors
    ///
    /// - `TableliftError::Recognition` - the service failed, refused the request, or
    ///   returned a body that could not be parsed
    /// - `TableliftError::Validation` - the recognizer is misconfigured
    async fn analyze(&self, document: &[u8]) -> Result<AnalyzeDocumentResponse>;
}
