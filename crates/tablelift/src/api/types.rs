//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::config::ReconstructionConfig;
use crate::recognizer::TableRecognizer;

/// Default upload ceiling, matching the recognition service's synchronous document limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// API server size limit configuration.
///
/// # Default Values
///
/// - `max_request_body_bytes`: 10 MB (10,485,760 bytes)
/// - `max_multipart_field_bytes`: 10 MB (10,485,760 bytes)
///
/// # Configuration via Environment Variables
///
/// ```bash
/// export TABLELIFT_MAX_REQUEST_BODY_BYTES=10485760
/// export TABLELIFT_MAX_MULTIPART_FIELD_BYTES=10485760
/// ```
///
/// # Examples
///
/// ```
/// use tablelift::api::ApiSizeLimits;
///
/// let limits = ApiSizeLimits::default();
/// assert_eq!(limits.max_request_body_bytes, 10 * 1024 * 1024);
///
/// let limits = ApiSizeLimits::from_mb(5, 5);
/// assert_eq!(limits.max_multipart_field_bytes, 5 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes.
    pub max_request_body_bytes: usize,

    /// Maximum size of a single multipart field in bytes.
    pub max_multipart_field_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self {
            max_request_body_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_multipart_field_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize, max_multipart_field_bytes: usize) -> Self {
        Self {
            max_request_body_bytes,
            max_multipart_field_bytes,
        }
    }

    /// Create size limits from MB values.
    pub fn from_mb(max_request_body_mb: usize, max_multipart_field_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            max_multipart_field_bytes: max_multipart_field_mb * 1024 * 1024,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub version: String,
    /// Name of the recognizer serving `/upload`
    pub recognizer: String,
    /// Multipart field expected by `/upload`
    pub upload_field: String,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Error type name, e.g. `ValidationError`
    pub error_type: String,
    /// HTTP status code
    pub status_code: u16,
}

/// API server state.
///
/// Built once at startup and cloned into every request; the recognizer and
/// reconstruction options are shared, never mutated.
#[derive(Clone)]
pub struct ApiState {
    pub recognizer: Arc<dyn TableRecognizer>,
    pub reconstruction: Arc<ReconstructionConfig>,
    pub upload_field: Arc<str>,
    /// Largest accepted file, checked after the field is read
    pub max_field_bytes: usize,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("recognizer", &self.recognizer.name())
            .field("reconstruction", &self.reconstruction)
            .field("upload_field", &self.upload_field)
            .field("max_field_bytes", &self.max_field_bytes)
            .finish()
    }
}
