//! Table view instance
//!
//! One `TableView` owns one entity's in-memory snapshot plus its view state.
//! The snapshot is only ever fully replaced by a fetch; mutations go through
//! the API client, are awaited, and then trigger an immediate re-fetch. No
//! fire-and-forget timers.
//!
//! Fetches carry a generation number. A snapshot produced by a fetch that
//! has since been superseded (or whose view was reset) is dropped instead of
//! applied, so a slow response can never overwrite newer data.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::catalog::EntityDef;
use crate::export::{self, ExportFile, ExportFormat};
use crate::record::Record;
use crate::table::{self, TablePage};
use crate::view::ViewState;

pub struct TableView {
    entity: &'static EntityDef,
    client: Arc<ApiClient>,
    records: Vec<Record>,
    pub view: ViewState,
    loading: bool,
    loaded: bool,
    generation: u64,
}

impl TableView {
    pub fn new(entity: &'static EntityDef, client: Arc<ApiClient>) -> Self {
        Self {
            entity,
            client,
            records: Vec::new(),
            view: ViewState::new(&entity.fields),
            loading: false,
            loaded: false,
            generation: 0,
        }
    }

    pub fn entity(&self) -> &'static EntityDef {
        self.entity
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether at least one snapshot has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Start a fetch: bumps the generation and returns the token the caller
    /// must hand back to [`apply_snapshot`](Self::apply_snapshot). Splitting
    /// begin/apply lets callers release their lock on the view while the
    /// request is in flight.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply a fetched snapshot if its generation is still current. Returns
    /// `true` when applied, `false` when the snapshot was stale and dropped.
    pub fn apply_snapshot(&mut self, generation: u64, records: Vec<Record>) -> bool {
        if generation != self.generation {
            log::debug!(
                "🗑️ {}: dropping stale snapshot (generation {} < {})",
                self.entity.slug,
                generation,
                self.generation
            );
            return false;
        }
        self.entity.validate_records(&records);
        log::info!("📥 {}: snapshot of {} records", self.entity.slug, records.len());
        self.records = records;
        self.loading = false;
        self.loaded = true;
        true
    }

    /// Mark an in-flight fetch as failed without touching the snapshot.
    pub fn fail_refresh(&mut self, generation: u64) {
        if generation == self.generation {
            self.loading = false;
        }
    }

    /// Fetch and apply in one call (CLI and mutation paths, where the view
    /// is exclusively held anyway).
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let generation = self.begin_refresh();
        match self.client.list(self.entity.path).await {
            Ok(records) => {
                self.apply_snapshot(generation, records);
                Ok(())
            }
            Err(e) => {
                self.fail_refresh(generation);
                Err(e)
            }
        }
    }

    /// Create a record, await the result, then re-fetch the snapshot.
    pub async fn create(&mut self, body: &Value) -> Result<(), ApiError> {
        self.client.create(self.entity.path, body).await?;
        self.refresh().await
    }

    /// Update a record, await the result, then re-fetch the snapshot.
    pub async fn update(&mut self, id: &str, body: &Value) -> Result<(), ApiError> {
        self.client.update(self.entity.path, id, body).await?;
        self.refresh().await
    }

    /// Delete a record after explicit confirmation. Without confirmation no
    /// request is issued and the snapshot is left untouched; returns whether
    /// a delete actually happened.
    pub async fn remove(&mut self, id: &str, confirmed: bool) -> Result<bool, ApiError> {
        if !confirmed {
            log::debug!("🚫 {}: delete of {} declined, no request issued", self.entity.slug, id);
            return Ok(false);
        }
        self.client.delete(self.entity.path, id).await?;
        self.refresh().await?;
        Ok(true)
    }

    /// Run the engine over the current snapshot.
    pub fn page(&self) -> TablePage {
        table::run(&self.records, &self.view, &self.entity.searchable)
    }

    /// Export the filtered+sorted list (all pages) with the current column
    /// selection.
    pub fn export(&self, format: ExportFormat) -> Result<ExportFile, export::ExportError> {
        let list = table::filtered_sorted(&self.records, &self.view, &self.entity.searchable);
        let fields = self.view.selected_fields(&self.entity.fields);
        export::export(&list, &fields, self.entity, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Session;
    use crate::catalog;
    use serde_json::json;
    use std::time::Duration;

    fn view() -> TableView {
        let client = Arc::new(
            ApiClient::new("http://127.0.0.1:1", Session::anonymous(), Duration::from_secs(1))
                .unwrap(),
        );
        TableView::new(catalog::find("drivers").unwrap(), client)
    }

    fn snapshot(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Record::from_pairs([("id", json!(i + 1)), ("name", json!(n))]))
            .collect()
    }

    #[test]
    fn test_stale_snapshot_is_dropped() {
        let mut v = view();
        let first = v.begin_refresh();
        let second = v.begin_refresh();
        // The older fetch resolves last; its snapshot must not win
        assert!(v.apply_snapshot(second, snapshot(&["new"])));
        assert!(!v.apply_snapshot(first, snapshot(&["old"])));
        assert_eq!(v.records().len(), 1);
        assert_eq!(v.records()[0].get_path("name"), Some(&json!("new")));
    }

    #[test]
    fn test_loading_flag_lifecycle() {
        let mut v = view();
        assert!(!v.is_loading());
        let generation = v.begin_refresh();
        assert!(v.is_loading());
        v.apply_snapshot(generation, snapshot(&["a"]));
        assert!(!v.is_loading());
        assert!(v.is_loaded());
    }

    #[test]
    fn test_failed_refresh_clears_loading_only_for_current_generation() {
        let mut v = view();
        let first = v.begin_refresh();
        let _second = v.begin_refresh();
        v.fail_refresh(first); // stale failure: ignored
        assert!(v.is_loading());
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_issues_no_request() {
        // The client points at an unroutable address; if a request were
        // issued this would return a network error instead of Ok(false).
        let mut v = view();
        let deleted = v.remove("5", false).await.unwrap();
        assert!(!deleted);
    }

    #[test]
    fn test_page_uses_view_state() {
        let mut v = view();
        let generation = v.begin_refresh();
        v.apply_snapshot(generation, snapshot(&["Kwame", "Ama", "Yaw"]));
        v.view.set_page_size(5);
        let page = v.page();
        assert_eq!(page.total_records, 3);
        assert_eq!(page.total_pages, 1);
    }
}
