//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use fleetdeck_core::prelude::*;
//! ```
//!
//! Re-exports the types most callers need so a binary can get going with a
//! single import.

// === Configuration and logging ===
pub use crate::config::FleetdeckConfig;
pub use crate::logging::init_logging;

// === Catalog and records ===
pub use crate::catalog::{self, EntityDef};
pub use crate::fields::{FieldDescriptor, ValueKind};
pub use crate::record::Record;

// === View engine ===
pub use crate::table::TablePage;
pub use crate::table_view::TableView;
pub use crate::view::{SortDirection, ViewState};

// === Export ===
pub use crate::export::{ExportFile, ExportFormat};

// === API client ===
pub use crate::api::{ApiClient, ApiError, Session};

// === Server ===
pub use crate::http::DashboardServer;
