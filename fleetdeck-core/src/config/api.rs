//! Fleet API configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the fleet REST API
    /// Env: FD_API_URL
    /// Default: "http://127.0.0.1:9000"
    pub base_url: String,

    /// Bearer token attached to protected requests
    /// Env: FD_API_TOKEN
    /// Default: none (anonymous)
    pub token: Option<String>,

    /// Per-request timeout in seconds
    /// Env: FD_API_TIMEOUT
    /// Default: 30
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://127.0.0.1:9000".to_string(), token: None, timeout_secs: 30 }
    }
}

impl ApiConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.base_url = other.base_url;
        self.token = other.token.or(self.token.take());
        self.timeout_secs = other.timeout_secs;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(url) = env::var("FD_API_URL") {
            self.base_url = url;
        }
        if let Ok(token) = env::var("FD_API_TOKEN") {
            self.token = Some(token);
        }
        if let Ok(timeout) = env::var("FD_API_TIMEOUT") {
            if let Ok(timeout) = timeout.parse() {
                self.timeout_secs = timeout;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            bail!("api.base_url must start with http:// or https://");
        }
        if self.timeout_secs == 0 {
            bail!("api.timeout_secs must not be 0");
        }
        Ok(())
    }
}
