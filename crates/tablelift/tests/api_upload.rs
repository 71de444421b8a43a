#![cfg(feature = "api")]
//! Integration tests for the `/upload` API handler using multipart uploads.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tablelift::{
    Result, TableRecognizer, TableliftConfig, TableliftError,
    api::{ApiSizeLimits, create_router, create_router_with_limits},
    blocks::AnalyzeDocumentResponse,
};
use tower::ServiceExt;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
const BOUNDARY: &str = "X-BOUNDARY";

/// Serves one canned recognition response and counts calls.
struct Canned {
    response: Value,
    calls: AtomicUsize,
}

impl Canned {
    fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TableRecognizer for Canned {
    fn name(&self) -> &str {
        "canned"
    }

    async fn analyze(&self, _document: &[u8]) -> Result<AnalyzeDocumentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_value(self.response.clone())?)
    }
}

struct Unavailable;

#[async_trait]
impl TableRecognizer for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn analyze(&self, _document: &[u8]) -> Result<AnalyzeDocumentResponse> {
        Err(TableliftError::recognition("connection refused"))
    }
}

fn one_cell_table() -> Value {
    json!({"Blocks": [
        {"BlockType": "TABLE", "Id": "t", "Relationships": [{"Type": "CHILD", "Ids": ["c"]}]},
        {"BlockType": "CELL", "Id": "c", "RowIndex": 1, "ColumnIndex": 1,
         "Relationships": [{"Type": "CHILD", "Ids": ["w"]}]},
        {"BlockType": "WORD", "Id": "w", "Text": "Total"}
    ]})
}

fn router(recognizer: Arc<dyn TableRecognizer>) -> Router {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    create_router(recognizer, &TableliftConfig::default())
}

fn multipart_body(field: &str, file_name: Option<&str>, content: &[u8]) -> Vec<u8> {
    let disposition = match file_name {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };

    let mut body = format!(
        "--{BOUNDARY}\r\n\
Content-Disposition: {disposition}\r\n\
Content-Type: application/octet-stream\r\n\
\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .header("content-length", body.len())
        .body(Body::from(body))
        .expect("Failed to build request")
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1_000_000)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_upload_returns_tables() {
    let recognizer = Canned::new(one_cell_table());
    let (status, body) = send(
        router(recognizer.clone()),
        upload_request(multipart_body("photo", Some("scan.png"), PNG)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"tables": [{"tableId": 0, "rows": [{"rowId": 1, "cells": ["Total "]}]}]})
    );
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_file_field() {
    let recognizer = Canned::new(one_cell_table());
    let (status, body) = send(
        router(recognizer.clone()),
        upload_request(multipart_body("document", Some("scan.png"), PNG)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file part in the request");
    assert_eq!(body["error_type"], "ValidationError");
    assert_eq!(body["status_code"], 400);
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_filename() {
    let recognizer = Canned::new(one_cell_table());

    let (status, body) = send(
        router(recognizer.clone()),
        upload_request(multipart_body("photo", Some(""), PNG)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No selected file in the request");

    let (status, body) = send(
        router(recognizer.clone()),
        upload_request(multipart_body("photo", None, PNG)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No selected file in the request");

    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unsupported_and_empty_documents() {
    let recognizer = Canned::new(one_cell_table());

    let (status, body) = send(
        router(recognizer.clone()),
        upload_request(multipart_body("photo", Some("notes.txt"), b"just some text")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "UnsupportedFormatError");

    let (status, body) = send(
        router(recognizer.clone()),
        upload_request(multipart_body("photo", Some("empty.png"), b"")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "ValidationError");

    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_no_tables_found() {
    let recognizer = Canned::new(json!({"Blocks": [{"BlockType": "PAGE", "Id": "p"}]}));
    let (status, body) = send(
        router(recognizer),
        upload_request(multipart_body("photo", Some("scan.png"), PNG)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No tables found in the document");
    assert_eq!(body["error_type"], "NoTablesFoundError");
}

#[tokio::test]
async fn test_inconsistent_response_is_server_error() {
    let recognizer = Canned::new(json!({"Blocks": [
        {"BlockType": "TABLE", "Id": "t", "Relationships": [{"Type": "CHILD", "Ids": ["missing"]}]}
    ]}));
    let (status, body) = send(
        router(recognizer),
        upload_request(multipart_body("photo", Some("scan.png"), PNG)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "StructureError");
    assert_eq!(body["status_code"], 500);
}

#[tokio::test]
async fn test_recognizer_failure_is_server_error() {
    let (status, body) = send(
        router(Arc::new(Unavailable)),
        upload_request(multipart_body("photo", Some("scan.png"), PNG)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "RecognitionError");
}

#[tokio::test]
async fn test_custom_upload_field() {
    let recognizer = Canned::new(one_cell_table());
    let mut config = TableliftConfig::default();
    config.server.upload_field = "scan".to_string();
    let app = create_router(recognizer, &config);

    let (status, _) = send(
        app.clone(),
        upload_request(multipart_body("scan", Some("scan.png"), PNG)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, upload_request(multipart_body("photo", Some("scan.png"), PNG))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file part in the request");
}

#[tokio::test]
async fn test_oversized_request_rejected() {
    let recognizer = Canned::new(one_cell_table());
    let app = create_router_with_limits(recognizer.clone(), &TableliftConfig::default(), ApiSizeLimits::new(64, 64));

    let mut document = PNG.to_vec();
    document.resize(1024, 0);
    let response = app
        .oneshot(upload_request(multipart_body("photo", Some("scan.png"), &document)))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_oversized_field_rejected() {
    let recognizer = Canned::new(one_cell_table());
    let app = create_router_with_limits(
        recognizer.clone(),
        &TableliftConfig::default(),
        ApiSizeLimits::new(1024 * 1024, 16),
    );

    let (status, body) = send(app, upload_request(multipart_body("photo", Some("scan.png"), &[PNG, PNG].concat()))).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status_code"], 413);
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_health_and_info() {
    let app = router(Canned::new(one_cell_table()));

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let request = Request::builder().uri("/info").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recognizer"], "canned");
    assert_eq!(body["upload_field"], "photo");
}
