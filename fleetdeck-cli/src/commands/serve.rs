use std::path::Path;

use anyhow::Result;
use fleetdeck_core::prelude::*;

/// Start the dashboard server and run until the process is stopped.
pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    init_logging(&config.logging);
    DashboardServer::new(config).serve().await
}
