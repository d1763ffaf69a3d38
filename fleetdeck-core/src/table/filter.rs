//! Filter stage: case-insensitive substring search

use crate::record::{search_text, Record};

/// Retain the records where any searchable field's case-folded
/// stringification contains the case-folded query as a substring.
///
/// An empty query retains everything. When `searchable` is empty, every
/// top-level value of the record is a candidate. Missing and `null` fields
/// never match a non-empty query.
pub fn filter_records<'a>(
    records: &'a [Record],
    query: &str,
    searchable: &[String],
) -> Vec<&'a Record> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();

    records.iter().filter(|record| matches(record, &needle, searchable)).collect()
}

fn matches(record: &Record, needle: &str, searchable: &[String]) -> bool {
    if searchable.is_empty() {
        record.values().any(|v| search_text(v).to_lowercase().contains(needle))
    } else {
        searchable.iter().any(|key| {
            record
                .get_path(key)
                .map(|v| search_text(v).to_lowercase().contains(needle))
                .unwrap_or(false)
        })
    }
}
