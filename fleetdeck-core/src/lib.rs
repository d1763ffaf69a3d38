//! Fleetdeck - Core
//!
//! An embedded admin dashboard for fleet management data: drivers, vehicles,
//! repairs, insurance and the rest of the operational catalog, served from a
//! single binary and backed by a remote REST API.
//!
//! # Overview
//!
//! Every entity screen is the same machine: fetch a snapshot from the API,
//! then run it through the tabular view engine (a case-insensitive substring
//! filter, a stable single-column sort and 1-based pagination) and render
//! the current page. The same filtered and sorted list feeds the exporters
//! (Excel, CSV, PDF and a print-formatted document), so what you download is
//! exactly what the table shows.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fleetdeck_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FleetdeckConfig::load()?;
//!     init_logging(&config.logging);
//!     DashboardServer::new(config).serve().await
//! }
//! ```
//!
//! # Architecture
//!
//! - [`catalog`] - the entity definitions (fields, searchable keys, API paths)
//! - [`table`] - the filter → sort → paginate pipeline
//! - [`export`] - xlsx/csv/pdf/print rendering from the same row source
//! - [`api`] - REST client with bearer-token sessions
//! - [`table_view`] - per-entity snapshot plus view state, generation-guarded
//! - [`http`] - the dashboard server built on hyper

pub mod api;
pub mod catalog; // Entity definitions and field metadata
pub mod config; // Configuration system with TOML support
pub mod export;
pub mod fields;
pub mod format; // Display formatting for table cells
pub mod http;
pub mod logging; // env_logger integration with config-driven levels
pub mod prelude;
pub mod record;
pub mod table;
pub mod table_view;
pub mod view;
