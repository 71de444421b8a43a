//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::core::config::TableliftConfig;
use crate::recognizer::TableRecognizer;
use crate::{Result, TableliftError};

use super::{
    handlers::{health_handler, info_handler, upload_handler},
    types::{ApiSizeLimits, ApiState},
};

fn parse_bytes_var(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    match value.parse::<usize>() {
        Ok(bytes) if bytes > 0 => Some(bytes),
        _ => {
            tracing::warn!("Ignoring {}='{}', must be a positive integer", name, value);
            None
        }
    }
}

/// Parse size limits from environment variables.
///
/// - `TABLELIFT_MAX_REQUEST_BODY_BYTES` - maximum total request body size
/// - `TABLELIFT_MAX_MULTIPART_FIELD_BYTES` - maximum uploaded file size; defaults to the
///   request body limit when only that one is set
///
/// Unset, unparsable, or zero values fall back to the 10 MB default.
pub fn parse_size_limits_from_env() -> ApiSizeLimits {
    let defaults = ApiSizeLimits::default();

    let limits = match parse_bytes_var("TABLELIFT_MAX_REQUEST_BODY_BYTES") {
        Some(body) => {
            let field = parse_bytes_var("TABLELIFT_MAX_MULTIPART_FIELD_BYTES").unwrap_or(body);
            ApiSizeLimits::new(body, field)
        }
        None => ApiSizeLimits::new(
            defaults.max_request_body_bytes,
            parse_bytes_var("TABLELIFT_MAX_MULTIPART_FIELD_BYTES").unwrap_or(defaults.max_multipart_field_bytes),
        ),
    };

    tracing::info!(
        "Upload size limits: request_body={} bytes ({:.1} MB), multipart_field={} bytes ({:.1} MB)",
        limits.max_request_body_bytes,
        limits.max_request_body_bytes as f64 / (1024.0 * 1024.0),
        limits.max_multipart_field_bytes,
        limits.max_multipart_field_bytes as f64 / (1024.0 * 1024.0)
    );
    limits
}

fn cors_layer() -> CorsLayer {
    if let Ok(origins_str) = std::env::var("TABLELIFT_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any);
        }

        tracing::warn!("TABLELIFT_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS");
    } else {
        tracing::warn!(
            "CORS configured to allow all origins (default). Set TABLELIFT_CORS_ORIGINS to a \
             comma-separated list of allowed origins for production"
        );
    }

    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Create the API router with default size limits.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use tablelift::{TableliftConfig, TextractClient, api::create_router};
///
/// # fn main() -> tablelift::Result<()> {
/// let config = TableliftConfig::load(None)?;
/// let recognizer = Arc::new(TextractClient::new(&config.textract)?);
/// let app = axum::Router::new().nest("/tables", create_router(recognizer, &config));
/// # Ok(())
/// # }
/// ```
pub fn create_router(recognizer: Arc<dyn TableRecognizer>, config: &TableliftConfig) -> Router {
    create_router_with_limits(recognizer, config, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
///
/// Requests larger than `limits.max_request_body_bytes` are rejected with 413
/// before the handler runs.
pub fn create_router_with_limits(
    recognizer: Arc<dyn TableRecognizer>,
    config: &TableliftConfig,
    limits: ApiSizeLimits,
) -> Router {
    let state = ApiState {
        recognizer,
        reconstruction: Arc::new(config.reconstruction.clone()),
        upload_field: Arc::from(config.server.upload_field.as_str()),
        max_field_bytes: limits.max_multipart_field_bytes,
    };

    Router::new()
        .route("/upload", post(upload_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server on `config.server.host:config.server.port`.
///
/// Size limits come from the environment; see [`parse_size_limits_from_env`].
///
/// # Environment Variables
///
/// ```bash
/// export TABLELIFT_HOST=0.0.0.0
/// export TABLELIFT_PORT=5000
/// export TABLELIFT_CORS_ORIGINS="https://app.example.com"
/// export TABLELIFT_MAX_REQUEST_BODY_BYTES=10485760
/// ```
pub async fn serve(config: TableliftConfig, recognizer: Arc<dyn TableRecognizer>) -> Result<()> {
    let limits = parse_size_limits_from_env();
    serve_with_limits(config, recognizer, limits).await
}

/// Start the API server with explicit size limits.
pub async fn serve_with_limits(
    config: TableliftConfig,
    recognizer: Arc<dyn TableRecognizer>,
    limits: ApiSizeLimits,
) -> Result<()> {
    let ip: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| TableliftError::validation(format!("Invalid host address '{}': {}", config.server.host, e)))?;

    let addr = SocketAddr::new(ip, config.server.port);
    let app = create_router_with_limits(recognizer, &config, limits);

    tracing::info!("Starting tablelift API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(TableliftError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| TableliftError::Other(e.to_string()))?;

    Ok(())
}
