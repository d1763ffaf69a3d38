use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use fleetdeck_core::prelude::*;

pub struct ExportOptions {
    pub entity: String,
    pub format: String,
    pub output: Option<PathBuf>,
    pub query: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
}

/// Fetch one entity from the API and write an export file, no server needed.
pub async fn run(config_path: Option<&Path>, opts: ExportOptions) -> Result<()> {
    let config = super::load_config(config_path)?;
    init_logging(&config.logging);

    let entity = catalog::find(&opts.entity)
        .ok_or_else(|| anyhow!("unknown entity \"{}\" (try `fleetdeck entities`)", opts.entity))?;
    let format = ExportFormat::parse(&opts.format)?;

    let client = Arc::new(ApiClient::from_config(&config.api)?);
    let mut view = TableView::new(entity, client);
    view.refresh().await.context("failed to fetch records")?;

    if let Some(query) = opts.query {
        view.view.set_query(query);
    }
    if let Some(key) = opts.sort {
        let direction = if opts.desc { SortDirection::Descending } else { SortDirection::Ascending };
        view.view.set_sort(key, direction);
    }

    let file = view.export(format)?;
    let path = opts.output.unwrap_or_else(|| PathBuf::from(&file.filename));
    std::fs::write(&path, &file.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("📤 exported {} records to {}", view.records().len(), path.display());
    println!("{}", path.display());
    Ok(())
}
