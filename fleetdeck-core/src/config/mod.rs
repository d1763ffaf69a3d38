//! Configuration system for Fleetdeck
//!
//! Values are resolved with a clear supersedence hierarchy (highest priority
//! wins):
//!
//! 1. **Environment variables** (`FD_*`)
//! 2. **Config file** (fleetdeck.toml)
//! 3. **Defaults**

pub mod api;
pub mod logging;
pub mod server;
pub mod ui;

pub use api::ApiConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use ui::UiConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete Fleetdeck configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetdeckConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl FleetdeckConfig {
    /// Load configuration with the full supersedence chain, reading
    /// `fleetdeck.toml` from the working directory when present.
    pub fn load() -> Result<Self> {
        Self::load_from("fleetdeck.toml")
    }

    /// Load configuration from a specific file (still applying env vars on
    /// top).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.server.merge(other.server);
        self.api.merge(other.api);
        self.ui.merge(other.ui);
        self.logging.merge(other.logging);
    }

    /// Apply environment variables to configuration
    pub fn apply_env_vars(&mut self) {
        self.server.apply_env_vars();
        self.api.apply_env_vars();
        self.ui.apply_env_vars();
        self.logging.apply_env_vars();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.api.validate()?;
        self.ui.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
