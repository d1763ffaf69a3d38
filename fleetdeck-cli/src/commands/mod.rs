pub mod entities;
pub mod export;
pub mod serve;

use std::path::Path;

use anyhow::Result;
use fleetdeck_core::prelude::*;

/// Load configuration from an explicit path or the default search order.
pub fn load_config(path: Option<&Path>) -> Result<FleetdeckConfig> {
    let config = match path {
        Some(path) => FleetdeckConfig::load_from(path)?,
        None => FleetdeckConfig::load()?,
    };
    Ok(config)
}
