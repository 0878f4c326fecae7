//! Verification backend connection configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which gateway implementation serves the verification operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayProvider {
    /// REST backend at `base_url`
    #[default]
    Http,
    /// In-process backend for development and demos
    InMemory,
}

/// Where and how to reach the backend exposing the two verification operations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub provider: GatewayProvider,

    /// Backend base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the operation that issues a one-time code
    #[serde(default = "default_request_code_path")]
    pub request_code_path: String,

    /// Path of the operation that checks a code and returns the contact
    #[serde(default = "default_verify_code_path")]
    pub verify_code_path: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: GatewayProvider::default(),
            base_url: default_base_url(),
            request_code_path: default_request_code_path(),
            verify_code_path: default_verify_code_path(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_code_url(&self) -> String {
        join_url(&self.base_url, &self.request_code_path)
    }

    pub fn verify_code_url(&self) -> String {
        join_url(&self.base_url, &self.verify_code_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_base_url() -> String {
    String::from("http://localhost:8080")
}

fn default_request_code_path() -> String {
    String::from("/api/v1/portal/verification/send-code")
}

fn default_verify_code_path() -> String {
    String::from("/api/v1/portal/verification/verify")
}

fn default_timeout_secs() -> u64 {
    30
}
