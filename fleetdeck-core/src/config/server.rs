//! Dashboard server configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening address
    /// Env: FD_HOST
    /// Default: "127.0.0.1"
    pub host: String,

    /// Listening port
    /// Env: FD_PORT
    /// Default: 8080
    pub port: u16,

    /// Log one line per handled request
    /// Env: FD_ACCESS_LOG
    /// Default: true
    pub access_log: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080, access_log: true }
    }
}

impl ServerConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.host = other.host;
        self.port = other.port;
        self.access_log = other.access_log;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(host) = env::var("FD_HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("FD_PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Ok(v) = env::var("FD_ACCESS_LOG") {
            self.access_log = v == "1" || v.eq_ignore_ascii_case("true");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!("server.host must not be empty");
        }
        if self.port == 0 {
            bail!("server.port must not be 0");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
