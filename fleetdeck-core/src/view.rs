//! Per-view ephemeral state
//!
//! The query/sort/page/selection tuple of one table view instance. View state
//! is never persisted; together with the fetched record list and the entity's
//! field descriptors it fully determines the rendered page and every export.

use serde::{Deserialize, Serialize};

use crate::fields::FieldDescriptor;

/// Page sizes the paginator accepts.
pub const PAGE_SIZES: &[usize] = &[5, 10, 25, 50, 100];

/// Default page size for a fresh view.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Parse the `asc`/`desc` query-parameter form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Ephemeral state of one table view.
///
/// Every mutation that changes which records are visible (query, page size,
/// sort field) resets the page to 1 so a stale out-of-range page is never
/// displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub query: String,
    /// Active sort column and direction; `None` keeps fetch order.
    pub sort: Option<(String, SortDirection)>,
    /// Current page, 1-based.
    pub page: usize,
    pub page_size: usize,
    /// Keys of the fields shown on screen and included in exports.
    pub selected: Vec<String>,
}

impl ViewState {
    /// Fresh state with all of the entity's fields selected.
    pub fn new(fields: &[FieldDescriptor]) -> Self {
        Self {
            query: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selected: fields.iter().map(|f| f.key.clone()).collect(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    /// Column-header click: re-selecting the active column flips direction,
    /// a new column starts ascending. Either way the page resets.
    pub fn toggle_sort(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.sort = match self.sort.take() {
            Some((active, dir)) if active == key => Some((active, dir.flipped())),
            _ => Some((key, SortDirection::Ascending)),
        };
        self.page = 1;
    }

    /// Set an explicit sort column and direction (used by the app API where
    /// the client echoes its current state). Resets the page when the sort
    /// actually changes.
    pub fn set_sort(&mut self, key: impl Into<String>, direction: SortDirection) {
        let next = Some((key.into(), direction));
        if next != self.sort {
            self.sort = next;
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Only the sizes in [`PAGE_SIZES`] are accepted; anything else is
    /// ignored. A change resets the page.
    pub fn set_page_size(&mut self, size: usize) {
        if PAGE_SIZES.contains(&size) && size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    /// Toggle a column in and out of the selection. The last remaining
    /// column cannot be removed.
    pub fn toggle_field(&mut self, key: &str) {
        if let Some(pos) = self.selected.iter().position(|k| k == key) {
            if self.selected.len() > 1 {
                self.selected.remove(pos);
            }
        } else {
            self.selected.push(key.to_string());
        }
    }

    /// Replace the selection wholesale, keeping only keys the entity knows.
    pub fn set_selected(&mut self, keys: &[String], fields: &[FieldDescriptor]) {
        let selected: Vec<String> = keys
            .iter()
            .filter(|k| fields.iter().any(|f| &f.key == *k))
            .cloned()
            .collect();
        if !selected.is_empty() {
            self.selected = selected;
        }
    }

    /// Selected descriptors in catalog order, which is the column order used by the
    /// table and all exports.
    pub fn selected_fields<'a>(&self, fields: &'a [FieldDescriptor]) -> Vec<&'a FieldDescriptor> {
        fields.iter().filter(|f| self.selected.iter().any(|k| k == &f.key)).collect()
    }
}
