//! AWS Textract `AnalyzeDocument` client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::TableRecognizer;
use super::sigv4::{self, Credentials, SignableRequest};
use crate::blocks::AnalyzeDocumentResponse;
use crate::core::config::TextractConfig;
use crate::{Result, TableliftError};

const SERVICE: &str = "textract";
const TARGET: &str = "Textract.AnalyzeDocument";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AnalyzeDocumentRequest<'a> {
    document: DocumentPayload,
    feature_types: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DocumentPayload {
    bytes: String,
}

/// Error body returned by AWS JSON-protocol services.
#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

impl ServiceError {
    /// `com.amazonaws.textract#ThrottlingException` → `ThrottlingException`
    fn short_kind(&self) -> &str {
        self.kind
            .as_deref()
            .map(|kind| kind.rsplit('#').next().unwrap_or(kind))
            .unwrap_or("UnknownError")
    }
}

/// Textract client, built once and shared by every request.
#[derive(Debug, Clone)]
pub struct TextractClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    host: String,
    region: String,
    credentials: Credentials,
    feature_types: Vec<String>,
}

impl TextractClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// `TableliftError::Validation` when credentials are missing, `timeout_secs` is 0,
    /// the endpoint is not a valid URL, or the HTTP client cannot be constructed.
    pub fn new(config: &TextractConfig) -> Result<Self> {
        let (access_key_id, secret_access_key) = match (&config.access_key_id, &config.secret_access_key) {
            (Some(id), Some(secret)) => (id.clone(), secret.clone()),
            _ => {
                return Err(TableliftError::validation(
                    "AWS credentials are not configured; set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY",
                ));
            }
        };

        if config.timeout_secs == 0 {
            return Err(TableliftError::validation(
                "Textract timeout_secs must be at least 1 second",
            ));
        }

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://textract.{}.amazonaws.com/", config.region));
        let endpoint = reqwest::Url::parse(&endpoint).map_err(|e| {
            TableliftError::validation_with_source(format!("Invalid Textract endpoint '{}'", endpoint), e)
        })?;

        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(TableliftError::validation(format!(
                    "Textract endpoint '{}' has no host",
                    endpoint
                )));
            }
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TableliftError::validation_with_source("Failed to create HTTP client", e))?;

        tracing::info!("Textract client configured for region {} at {}", config.region, endpoint);

        Ok(Self {
            http,
            endpoint,
            host,
            region: config.region.clone(),
            credentials: Credentials {
                access_key_id,
                secret_access_key,
                session_token: config.session_token.clone(),
            },
            feature_types: config.feature_types.clone(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn request_body(&self, document: &[u8]) -> Result<Vec<u8>> {
        let request = AnalyzeDocumentRequest {
            document: DocumentPayload {
                bytes: STANDARD.encode(document),
            },
            feature_types: &self.feature_types,
        };
        Ok(serde_json::to_vec(&request)?)
    }
}

#[async_trait]
impl TableRecognizer for TextractClient {
    fn name(&self) -> &str {
        "textract"
    }

    async fn analyze(&self, document: &[u8]) -> Result<AnalyzeDocumentResponse> {
        let body = self.request_body(document)?;
        let now = chrono::Utc::now();
        let amz_date = sigv4::amz_date(&now);

        let mut headers: Vec<(&str, &str)> = vec![
            ("content-type", CONTENT_TYPE),
            ("host", self.host.as_str()),
            ("x-amz-date", amz_date.as_str()),
            ("x-amz-target", TARGET),
        ];
        if let Some(token) = &self.credentials.session_token {
            headers.push(("x-amz-security-token", token.as_str()));
        }

        let signable = SignableRequest {
            method: "POST",
            path: self.endpoint.path(),
            headers: &headers,
            payload: &body,
        };
        let authorization = sigv4::authorization(&signable, &self.credentials, &self.region, SERVICE, &now)?;

        let mut request = self.http.post(self.endpoint.clone()).header("authorization", authorization);
        for (name, value) in headers.iter().filter(|(name, _)| *name != "host") {
            request = request.header(*name, *value);
        }

        tracing::debug!("Sending {} byte document to Textract", document.len());

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| TableliftError::recognition_with_source("Textract request failed", e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TableliftError::recognition_with_source("Failed to read Textract response", e))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ServiceError>(&bytes)
                .map(|err| {
                    format!(
                        "{}: {}",
                        err.short_kind(),
                        err.message.as_deref().unwrap_or("no message")
                    )
                })
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            tracing::warn!("Textract returned {}: {}", status, detail);
            return Err(TableliftError::recognition(format!(
                "Textract returned status {}: {}",
                status, detail
            )));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| TableliftError::recognition_with_source("Malformed Textract response", e))
    }
}
