//! Configuration loading and management.
//!
//! Configuration can come from TOML, YAML, or JSON files, from discovery of a
//! `tablelift.toml` in the current or any parent directory, or be built in code.
//! Credentials and the listen address can be overridden from the environment with
//! [`TableliftConfig::apply_env_overrides`].
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//! upload_field = "photo"
//!
//! [textract]
//! region = "eu-west-1"
//! timeout_secs = 30
//!
//! [reconstruction]
//! order = "sorted"
//! gaps = "pad"
//! include_confidence = true
//! max_padded_columns = 200
//! ```

use crate::{Result, TableliftError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the file [`TableliftConfig::discover`] looks for.
pub const CONFIG_FILE_NAME: &str = "tablelift.toml";

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableliftConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub textract: TextractConfig,

    #[serde(default)]
    pub reconstruction: ReconstructionConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Multipart field carrying the uploaded document
    #[serde(default = "default_upload_field")]
    pub upload_field: String,
}

/// Recognition service (AWS Textract) settings.
///
/// Credentials should normally come from the environment rather than a file.
#[derive(Clone, Serialize, Deserialize)]
pub struct TextractConfig {
    /// AWS region, e.g. "us-east-1"
    #[serde(default = "default_region")]
    pub region: String,

    /// Override the service endpoint (e.g. a local mock or VPC endpoint)
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub access_key_id: Option<String>,

    #[serde(default)]
    pub secret_access_key: Option<String>,

    #[serde(default)]
    pub session_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `FeatureTypes` sent with every request
    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,
}

// Hand-written so the secret never reaches logs.
impl std::fmt::Debug for TextractConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextractConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("feature_types", &self.feature_types)
            .finish()
    }
}

/// How block graphs are flattened into rows.
///
/// The defaults reproduce the service's own ordering and drop missing columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionConfig {
    #[serde(default)]
    pub order: RowOrder,

    #[serde(default)]
    pub gaps: GapPolicy,

    /// Emit per-cell confidence arrays alongside the cell text
    #[serde(default)]
    pub include_confidence: bool,

    /// Widest table `GapPolicy::Pad` will expand; a larger `ColumnIndex` is a structural error
    #[serde(default = "default_max_padded_columns")]
    pub max_padded_columns: u32,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            order: RowOrder::default(),
            gaps: GapPolicy::default(),
            include_confidence: false,
            max_padded_columns: default_max_padded_columns(),
        }
    }
}

/// Row and column ordering of reconstructed tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Order in which rows/columns were first seen in the table's relationships
    #[default]
    Encounter,
    /// Ascending numeric `RowIndex` / `ColumnIndex`
    Sorted,
}

/// Treatment of grid positions the service reported no cell for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Leave them out; later cells in the row shift left
    #[default]
    Skip,
    /// Emit `""` so every row has `max_column` cells in column order
    Pad,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_upload_field() -> String {
    "photo".to_string()
}
fn default_region() -> String {
    "us-east-1".to_string()
}
fn default_max_padded_columns() -> u32 {
    1000
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_feature_types() -> Vec<String> {
    vec!["TABLES".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_field: default_upload_field(),
        }
    }
}

impl Default for TextractConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            timeout_secs: default_timeout_secs(),
            feature_types: default_feature_types(),
        }
    }
}

impl TableliftConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `TableliftError::Validation` if the file cannot be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| TableliftError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| TableliftError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| TableliftError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    ///
    /// `.yaml`/`.yml` and `.json` are recognised; anything else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()).map(|s| s.to_lowercase()).as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover `tablelift.toml` in the current directory or its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(TableliftError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Discovered config file at {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Load from an explicit path if given, otherwise discover, otherwise default,
    /// then overlay the environment with [`apply_env_overrides`](Self::apply_env_overrides).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::discover()?.unwrap_or_default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Overlay values from the environment.
    ///
    /// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`
    /// - `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`
    /// - `TABLELIFT_TEXTRACT_ENDPOINT`
    /// - `TABLELIFT_HOST`, `TABLELIFT_PORT`
    ///
    /// Unset or empty variables leave the current value alone; an unparsable port is
    /// logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = env_value("AWS_ACCESS_KEY_ID") {
            self.textract.access_key_id = Some(value);
        }
        if let Some(value) = env_value("AWS_SECRET_ACCESS_KEY") {
            self.textract.secret_access_key = Some(value);
        }
        if let Some(value) = env_value("AWS_SESSION_TOKEN") {
            self.textract.session_token = Some(value);
        }
        if let Some(value) = env_value("AWS_REGION").or_else(|| env_value("AWS_DEFAULT_REGION")) {
            self.textract.region = value;
        }
        if let Some(value) = env_value("TABLELIFT_TEXTRACT_ENDPOINT") {
            self.textract.endpoint = Some(value);
        }
        if let Some(value) = env_value("TABLELIFT_HOST") {
            self.server.host = value;
        }
        if let Some(value) = env_value("TABLELIFT_PORT") {
            match value.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring TABLELIFT_PORT='{}', must be a valid port number", value),
            }
        }
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| TableliftError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
