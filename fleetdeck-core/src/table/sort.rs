//! Sort stage: single-column, stable, null-safe

use std::cmp::Ordering;

use serde_json::Value;

use crate::record::Record;
use crate::view::SortDirection;

/// Sort the filtered list by one column.
///
/// Numbers compare numerically; everything else compares as strings with
/// missing and `null` coerced to the empty string, so missing values sort
/// first in ascending order. Ties keep their fetch order (the sort is
/// stable), and `None` leaves the list untouched.
pub fn sort_records(list: &mut [&Record], sort: Option<&(String, SortDirection)>) {
    let Some((key, direction)) = sort else {
        return;
    };

    list.sort_by(|a, b| {
        let ord = compare_values(a.get_path(key), b.get_path(key));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(x)), Some(Value::Number(y))) = (a, b) {
        return x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal);
    }
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repairs() -> Vec<Record> {
        vec![
            Record::from_pairs([("id", json!(1)), ("cost", json!(150))]),
            Record::from_pairs([("id", json!(2)), ("cost", json!(40))]),
            Record::from_pairs([("id", json!(3)), ("cost", json!(300))]),
        ]
    }

    fn costs(list: &[&Record]) -> Vec<i64> {
        list.iter().map(|r| r.get_path("cost").and_then(Value::as_i64).unwrap_or(-1)).collect()
    }

    #[test]
    fn test_numeric_ascending_then_descending() {
        let records = repairs();
        let mut list: Vec<&Record> = records.iter().collect();
        let asc = ("cost".to_string(), SortDirection::Ascending);
        sort_records(&mut list, Some(&asc));
        assert_eq!(costs(&list), vec![40, 150, 300]);

        let desc = ("cost".to_string(), SortDirection::Descending);
        sort_records(&mut list, Some(&desc));
        assert_eq!(costs(&list), vec![300, 150, 40]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let records = repairs();
        let mut once: Vec<&Record> = records.iter().collect();
        let asc = ("cost".to_string(), SortDirection::Ascending);
        sort_records(&mut once, Some(&asc));
        let mut twice = once.clone();
        sort_records(&mut twice, Some(&asc));
        assert_eq!(costs(&once), costs(&twice));
    }

    #[test]
    fn test_none_is_identity() {
        let records = repairs();
        let mut list: Vec<&Record> = records.iter().collect();
        sort_records(&mut list, None);
        assert_eq!(costs(&list), vec![150, 40, 300]);
    }

    #[test]
    fn test_missing_sorts_first_ascending() {
        let records = vec![
            Record::from_pairs([("id", json!(1)), ("region", json!("Volta"))]),
            Record::from_pairs([("id", json!(2)), ("region", json!(null))]),
            Record::from_pairs([("id", json!(3)), ("region", json!("Ashanti"))]),
            Record::from_pairs([("id", json!(4))]),
        ];
        let mut list: Vec<&Record> = records.iter().collect();
        let asc = ("region".to_string(), SortDirection::Ascending);
        sort_records(&mut list, Some(&asc));
        let ids: Vec<String> = list.iter().filter_map(|r| r.id()).collect();
        // Nulls/missing coerce to "" and keep their relative fetch order
        assert_eq!(ids, vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn test_ties_preserve_fetch_order() {
        let records = vec![
            Record::from_pairs([("id", json!(1)), ("status", json!("Active"))]),
            Record::from_pairs([("id", json!(2)), ("status", json!("Active"))]),
            Record::from_pairs([("id", json!(3)), ("status", json!("Active"))]),
        ];
        let mut list: Vec<&Record> = records.iter().collect();
        let asc = ("status".to_string(), SortDirection::Ascending);
        sort_records(&mut list, Some(&asc));
        let ids: Vec<String> = list.iter().filter_map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_string_comparison_for_mixed_kinds() {
        // A numeric value against a string compares as strings, not panics
        let records = vec![
            Record::from_pairs([("id", json!(1)), ("v", json!("20"))]),
            Record::from_pairs([("id", json!(2)), ("v", json!(100))]),
        ];
        let mut list: Vec<&Record> = records.iter().collect();
        let asc = ("v".to_string(), SortDirection::Ascending);
        sort_records(&mut list, Some(&asc));
        let ids: Vec<String> = list.iter().filter_map(|r| r.id()).collect();
        // "100" < "20" lexicographically
        assert_eq!(ids, vec!["2", "1"]);
    }
}
