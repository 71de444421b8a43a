//! API error handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::TableliftError;

use super::types::ErrorResponse;

/// An error returned from a handler, carrying the status it maps to.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: TableliftError,
}

impl ApiError {
    /// 400 Bad Request.
    pub fn validation(error: TableliftError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// 500 Internal Server Error.
    pub fn internal(error: TableliftError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }

    /// The message clients see: the bare message for caller mistakes, the full
    /// error chain head for server-side failures.
    fn message(&self) -> String {
        match &self.error {
            TableliftError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<TableliftError> for ApiError {
    fn from(error: TableliftError) -> Self {
        if error.is_client_error() {
            Self::validation(error)
        } else {
            Self::internal(error)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.error);
        } else {
            tracing::debug!("Rejected request: {}", self.error);
        }

        let body = ErrorResponse {
            error: self.message(),
            error_type: self.error.kind().to_string(),
            status_code: self.status.as_u16(),
        };

        (self.status, Json(body)).into_response()
    }
}
