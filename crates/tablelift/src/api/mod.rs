//! REST API server for table extraction.
//!
//! An Axum server that accepts a scanned document, sends it to the recognition
//! service, and answers with the reconstructed tables.
//!
//! # Endpoints
//!
//! - `POST /upload` - Extract tables from an uploaded image or PDF (multipart, field `photo`)
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Server information
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use tablelift::{TableliftConfig, TextractClient, api::serve};
//!
//! #[tokio::main]
//! async fn main() -> tablelift::Result<()> {
//!     let config = TableliftConfig::load(None)?;
//!     let recognizer = Arc::new(TextractClient::new(&config.textract)?);
//!     serve(config, recognizer).await
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! curl -F "photo=@invoice.png" http://localhost:5000/upload
//! curl http://localhost:5000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_limits, parse_size_limits_from_env, serve, serve_with_limits};
pub use types::{ApiSizeLimits, ApiState, DEFAULT_MAX_UPLOAD_BYTES, ErrorResponse, HealthResponse, InfoResponse};
