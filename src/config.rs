//! Configuration for the serving endpoint and the request loop.
//!
//! Configuration can come from a TOML file, from CLI flags, or both
//! (flags override file values). All fields have serde defaults so a
//! partial file is enough.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::error::{ClientError, Result};

/// Default server URL (scheme + host)
pub const DEFAULT_SERVER_URL: &str = "http://localhost";

/// Default serving REST port
pub const DEFAULT_SERVER_PORT: u16 = 8501;

/// Default model path on the server, without the predict verb
pub const DEFAULT_MODEL_PATH: &str = "v1/models/resnet";

/// Default number of timed requests per run
pub const DEFAULT_NUM_REQUESTS: usize = 10;

/// Default number of warmup requests (excluded from measurement)
pub const DEFAULT_WARMUP_REQUESTS: usize = 3;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Location of the model behind the serving endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server URL including scheme, e.g. `http://localhost`
    #[serde(default = "default_server_url")]
    pub base_url: String,

    /// REST API port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Model path, e.g. `v1/models/resnet`. The predict verb is appended
    /// when building the predict URL.
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

fn default_model_path() -> String {
    DEFAULT_MODEL_PATH.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_server_url(),
            port: default_server_port(),
            model_path: default_model_path(),
        }
    }
}

impl ServerConfig {
    /// Full URL of the predict endpoint
    pub fn predict_url(&self) -> String {
        format!("{}:predict", self.model_url())
    }

    /// Full URL of the model status endpoint
    pub fn status_url(&self) -> String {
        self.model_url()
    }

    fn model_url(&self) -> String {
        format!(
            "{}:{}/{}",
            self.base_url.trim_end_matches('/'),
            self.port,
            self.model_path.trim_matches('/')
        )
    }

    /// Check that the server location is usable
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "Server URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.model_path.trim_matches('/').is_empty() {
            return Err(ClientError::Config("Model path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Options controlling the request loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Number of timed requests per run
    #[serde(default = "default_num_requests")]
    pub num_requests: usize,

    /// Number of warmup requests issued before measurement starts.
    /// Zero disables warmup.
    #[serde(default = "default_warmup_requests")]
    pub warmup_requests: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_num_requests() -> usize {
    DEFAULT_NUM_REQUESTS
}

fn default_warmup_requests() -> usize {
    DEFAULT_WARMUP_REQUESTS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            num_requests: default_num_requests(),
            warmup_requests: default_warmup_requests(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RequestOptions {
    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that the loop configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.num_requests == 0 {
            return Err(ClientError::Config(
                "At least one timed request is required".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregate client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Serving endpoint location
    #[serde(default)]
    pub server: ServerConfig,

    /// Request loop options
    #[serde(default)]
    pub request: RequestOptions,
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_toml(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Validate both sections
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.request.validate()
    }
}
