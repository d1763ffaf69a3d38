//! Cell formatting
//!
//! One formatting function shared by on-screen rendering and every export
//! target, so a cell always reads the same no matter where it ends up. The
//! rules are dispatched by [`ValueKind`] instead of ad-hoc type switches per
//! view.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::fields::ValueKind;

/// Placeholder rendered for `null` or missing values in every output.
pub const MISSING_CELL: &str = "N/A";

/// Text cells are truncated with an ellipsis beyond this many characters.
pub const CELL_MAX_LEN: usize = 50;

/// Currency symbol prefixed to formatted amounts.
pub const CURRENCY_SYMBOL: &str = "$";

/// Format one cell value according to its field kind.
///
/// `None` and `Value::Null` both render as [`MISSING_CELL`], so exports and
/// the table body agree on how absent data looks.
pub fn format_cell(value: Option<&Value>, kind: ValueKind) -> String {
    let value = match value {
        None | Some(Value::Null) => return MISSING_CELL.to_string(),
        Some(v) => v,
    };

    match kind {
        ValueKind::Date => format_date(value),
        ValueKind::DateTime => format_datetime(value),
        ValueKind::Currency => format_currency(value),
        ValueKind::Status => capitalize(&raw_text(value)),
        ValueKind::Number => raw_text(value),
        ValueKind::Text => clean_text(&raw_text(value)),
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `DD/MM/YYYY`, falling back to the cleaned raw text when unparseable.
fn format_date(value: &Value) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => clean_text(&raw_text(value)),
    }
}

/// `DD/MM/YYYY HH:MM`, falling back to the cleaned raw text when unparseable.
fn format_datetime(value: &Value) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => clean_text(&raw_text(value)),
    }
}

/// Accept the timestamp shapes the fleet API actually emits: RFC 3339,
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    let s = value.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Symbol-prefixed, thousands-grouped amount with two decimals.
fn format_currency(value: &Value) -> String {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(a) => format!("{}{}", CURRENCY_SYMBOL, group_thousands(a)),
        None => clean_text(&raw_text(value)),
    }
}

/// `1234567.5` -> `1,234,567.50`
fn group_thousands(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, dec_part)
}

/// First letter uppercased, the rest lowercased: `"inactive"` -> `"Inactive"`.
fn capitalize(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Trim, collapse internal whitespace/tab runs to a single space, then
/// truncate with an ellipsis beyond [`CELL_MAX_LEN`] characters.
fn clean_text(s: &str) -> String {
    let collapsed: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > CELL_MAX_LEN {
        let truncated: String = collapsed.chars().take(CELL_MAX_LEN).collect();
        format!("{}…", truncated)
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_renders_na() {
        assert_eq!(format_cell(None, ValueKind::Text), "N/A");
        assert_eq!(format_cell(Some(&Value::Null), ValueKind::Currency), "N/A");
        assert_eq!(format_cell(Some(&Value::Null), ValueKind::Date), "N/A");
    }

    #[test]
    fn test_date_formats() {
        let v = json!("2024-03-05");
        assert_eq!(format_cell(Some(&v), ValueKind::Date), "05/03/2024");
        let v = json!("2024-03-05T14:30:00Z");
        assert_eq!(format_cell(Some(&v), ValueKind::DateTime), "05/03/2024 14:30");
        let v = json!("2024-03-05 14:30:00");
        assert_eq!(format_cell(Some(&v), ValueKind::DateTime), "05/03/2024 14:30");
    }

    #[test]
    fn test_unparseable_date_falls_back() {
        let v = json!("last tuesday");
        assert_eq!(format_cell(Some(&v), ValueKind::Date), "last tuesday");
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_cell(Some(&json!(1234567.5)), ValueKind::Currency), "$1,234,567.50");
        assert_eq!(format_cell(Some(&json!(40)), ValueKind::Currency), "$40.00");
        assert_eq!(format_cell(Some(&json!("150.00")), ValueKind::Currency), "$150.00");
        assert_eq!(format_cell(Some(&json!(-950.25)), ValueKind::Currency), "$-950.25");
    }

    #[test]
    fn test_status_capitalized() {
        assert_eq!(format_cell(Some(&json!("inactive")), ValueKind::Status), "Inactive");
        assert_eq!(format_cell(Some(&json!("ACTIVE")), ValueKind::Status), "Active");
    }

    #[test]
    fn test_text_collapses_whitespace() {
        let v = json!("  engine \t knock,\n  front axle ");
        assert_eq!(format_cell(Some(&v), ValueKind::Text), "engine knock, front axle");
    }

    #[test]
    fn test_text_truncation() {
        let long = "x".repeat(80);
        let out = format_cell(Some(&json!(long)), ValueKind::Text);
        assert_eq!(out.chars().count(), CELL_MAX_LEN + 1);
        assert!(out.ends_with('…'));
        // Exactly at the cap: untouched
        let exact = "y".repeat(CELL_MAX_LEN);
        assert_eq!(format_cell(Some(&json!(exact)), ValueKind::Text), exact);
    }

    #[test]
    fn test_number_plain() {
        assert_eq!(format_cell(Some(&json!(300)), ValueKind::Number), "300");
        assert_eq!(format_cell(Some(&json!(2.5)), ValueKind::Number), "2.5");
    }
}
