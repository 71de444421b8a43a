//! API request handlers.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use tracing::Instrument;

use crate::core::pipeline::extract_tables;
use crate::error::TableliftError;
use crate::types::TableSet;

use super::{
    error::ApiError,
    types::{ApiState, HealthResponse, InfoResponse},
};

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError {
        status: e.status(),
        error: TableliftError::validation(e.body_text()),
    }
}

/// Upload endpoint handler.
///
/// POST /upload
///
/// Accepts multipart form data with one file under the configured field name
/// (`photo` by default). Other fields are ignored. Returns the reconstructed
/// [`TableSet`] as JSON.
///
/// A part under the upload field with an empty or absent `filename` parameter is
/// answered with "No selected file in the request", not "No file part in the
/// request": a browser form that submits no file sends the part with `filename=""`,
/// and a part without the parameter is treated the same way.
///
/// # Errors
///
/// - 400 when the file field is missing, has no filename, is empty, is not a
///   supported format, or the document contains no tables
/// - 413 when the file exceeds the configured field limit
/// - 500 when recognition fails or the recognition response is inconsistent
pub async fn upload_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<TableSet>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("upload", %request_id);

    async move {
        let mut document = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(&*state.upload_field) {
                continue;
            }

            let file_name = field.file_name().unwrap_or("").to_string();
            if file_name.is_empty() {
                return Err(ApiError::validation(TableliftError::validation(
                    "No selected file in the request",
                )));
            }

            let data = field.bytes().await.map_err(multipart_error)?;
            if data.len() > state.max_field_bytes {
                return Err(ApiError {
                    status: StatusCode::PAYLOAD_TOO_LARGE,
                    error: TableliftError::validation(format!(
                        "File '{}' is {} bytes; the limit is {} bytes",
                        file_name,
                        data.len(),
                        state.max_field_bytes
                    )),
                });
            }

            tracing::debug!("Received '{}' ({} bytes)", file_name, data.len());
            document = Some(data);
            break;
        }

        let Some(document) = document else {
            return Err(ApiError::validation(TableliftError::validation(
                "No file part in the request",
            )));
        };

        let tables = extract_tables(state.recognizer.as_ref(), &document, &state.reconstruction).await?;
        Ok(Json(tables))
    }
    .instrument(span)
    .await
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler(State(state): State<ApiState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        recognizer: state.recognizer.name().to_string(),
        upload_field: state.upload_field.to_string(),
    })
}
