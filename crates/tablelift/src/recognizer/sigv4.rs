//! AWS Signature Version 4 request signing.
//!
//! Only what a JSON-protocol `POST /` needs: no query strings, no chunked payloads,
//! no presigning. Header names are lowercased and sorted; values are trimmed.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::{Result, TableliftError};

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

type HmacSha256 = Hmac<Sha256>;

/// Long-term or temporary AWS credentials.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The request parts that go into a signature.
#[derive(Debug, Clone)]
pub struct SignableRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    /// Every header to sign, including `host` and `x-amz-date`.
    pub headers: &'a [(&'a str, &'a str)],
    pub payload: &'a [u8],
}

/// `20150830T123600Z`
pub fn amz_date(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

fn date_stamp(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%d").to_string()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| TableliftError::recognition(format!("Failed to initialise HMAC: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the per-day, per-region, per-service signing key.
pub fn signing_key(secret_access_key: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{}", secret_access_key).as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// Sorted `name:value` lines and the matching `;`-joined name list.
fn canonical_headers(headers: &[(&str, &str)]) -> (String, String) {
    let mut normalized: Vec<(String, &str)> = headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim()))
        .collect();
    normalized.sort_by(|a, b| a.0.cmp(&b.0));

    let lines = normalized
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect::<String>();
    let names = normalized
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    (lines, names)
}

pub fn canonical_request(request: &SignableRequest<'_>) -> (String, String) {
    let (headers, signed_headers) = canonical_headers(request.headers);
    let canonical = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        request.method,
        request.path,
        headers,
        signed_headers,
        sha256_hex(request.payload)
    );
    (canonical, signed_headers)
}

/// Compute the `Authorization` header value for `request`.
///
/// `time` must match the `x-amz-date` header included in `request.headers`.
pub fn authorization(
    request: &SignableRequest<'_>,
    credentials: &Credentials,
    region: &str,
    service: &str,
    time: &DateTime<Utc>,
) -> Result<String> {
    let date = date_stamp(time);
    let scope = format!("{}/{}/{}/aws4_request", date, region, service);

    let (canonical, signed_headers) = canonical_request(request);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date(time),
        scope,
        sha256_hex(canonical.as_bytes())
    );

    let key = signing_key(&credentials.secret_access_key, &date, region, service)?;
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, credentials.access_key_id, scope, signed_headers, signature
    ))
}
