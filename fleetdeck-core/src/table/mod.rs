//! Tabular View Engine
//!
//! The filter → sort → paginate pipeline shared by every entity view. All
//! stages are pure, synchronous transforms over the fetched snapshot: the
//! rendered page is a function of record list × field descriptors × view
//! state, nothing else.

pub mod filter;
pub mod paginate;
pub mod sort;

use serde::Serialize;

use crate::record::Record;
use crate::view::ViewState;

pub use filter::filter_records;
pub use paginate::{page_slice, total_pages};
pub use sort::sort_records;

/// One renderable page plus its paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TablePage {
    pub records: Vec<Record>,
    /// Records surviving the filter (across all pages).
    pub total_records: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

/// The filtered and sorted list: the source for page slicing and for every
/// export (exports always cover all pages).
pub fn filtered_sorted<'a>(
    records: &'a [Record],
    view: &ViewState,
    searchable: &[String],
) -> Vec<&'a Record> {
    let mut list = filter_records(records, &view.query, searchable);
    sort_records(&mut list, view.sort.as_ref());
    list
}

/// Run the full pipeline and clone out the current page.
pub fn run(records: &[Record], view: &ViewState, searchable: &[String]) -> TablePage {
    let list = filtered_sorted(records, view, searchable);
    let slice = page_slice(&list, view.page, view.page_size);
    TablePage {
        records: slice.iter().map(|r| (*r).clone()).collect(),
        total_records: list.len(),
        total_pages: total_pages(list.len(), view.page_size),
        page: view.page,
        page_size: view.page_size,
    }
}
