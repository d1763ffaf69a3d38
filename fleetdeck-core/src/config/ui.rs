//! Dashboard UI configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::view::{DEFAULT_PAGE_SIZE, PAGE_SIZES};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Title shown in the dashboard header
    /// Env: FD_TITLE
    /// Default: "Fleetdeck"
    pub title: String,

    /// Page size a fresh view starts with; must be one of 5/10/25/50/100
    /// Env: FD_PAGE_SIZE
    /// Default: 10
    pub default_page_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { title: "Fleetdeck".to_string(), default_page_size: DEFAULT_PAGE_SIZE }
    }
}

impl UiConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.title = other.title;
        self.default_page_size = other.default_page_size;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(title) = env::var("FD_TITLE") {
            self.title = title;
        }
        if let Ok(size) = env::var("FD_PAGE_SIZE") {
            if let Ok(size) = size.parse() {
                self.default_page_size = size;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !PAGE_SIZES.contains(&self.default_page_size) {
            bail!("ui.default_page_size must be one of {:?}", PAGE_SIZES);
        }
        Ok(())
    }
}
