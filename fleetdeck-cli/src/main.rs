//! Fleetdeck CLI: dashboard server and one-shot exports.
//!
//! ```bash
//! fleetdeck serve
//! fleetdeck export drivers --format csv -o drivers.csv
//! fleetdeck entities
//! ```
//!
//! See `fleetdeck --help` for all available commands and options.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fleetdeck",
    about = "Fleet-management dashboard and export tool",
    version
)]
struct Cli {
    /// Path to a TOML config file (defaults to ./fleetdeck.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard HTTP server
    Serve,

    /// Fetch one entity and export it without starting a server
    Export {
        /// Entity slug, e.g. "drivers" (see `fleetdeck entities`)
        entity: String,

        /// Output format: xlsx, csv, pdf or print
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output path (defaults to the generated <entity>_<date>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Filter query applied before exporting
        #[arg(short, long)]
        query: Option<String>,

        /// Sort column key
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// List the entities in the catalog
    Entities,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve => commands::serve::run(cli.config.as_deref()).await,
        Commands::Export { entity, format, output, query, sort, desc } => {
            let opts = commands::export::ExportOptions {
                entity,
                format,
                output,
                query,
                sort,
                desc,
            };
            commands::export::run(cli.config.as_deref(), opts).await
        }
        Commands::Entities => commands::entities::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
