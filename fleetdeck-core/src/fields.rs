//! Field descriptors
//!
//! Static metadata describing one displayable/exportable column: the record
//! key it reads (dotted paths allowed), the label shown in table headers and
//! export headers, and the value kind driving formatting and comparison.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a field's values are formatted and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Number,
    Date,
    DateTime,
    Currency,
    Status,
}

/// Metadata for one displayable/exportable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Record key, possibly a dotted path for nested lookup.
    pub key: String,
    /// Human-readable column label.
    pub label: String,
    pub kind: ValueKind,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ValueKind) -> Self {
        Self { key: key.into(), label: label.into(), kind }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueKind::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueKind::Number)
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueKind::Date)
    }

    pub fn datetime(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueKind::DateTime)
    }

    pub fn currency(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueKind::Currency)
    }

    pub fn status(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueKind::Status)
    }
}

/// Loose kind check used when validating fetched records at the API boundary.
///
/// `Null` and missing values are always acceptable; the check only flags
/// values whose JSON type contradicts the declared kind.
pub fn kind_matches(value: &Value, kind: ValueKind) -> bool {
    match kind {
        ValueKind::Number | ValueKind::Currency => {
            // Some endpoints serialize amounts as strings
            value.is_null() || value.is_number() || value.is_string()
        }
        ValueKind::Date | ValueKind::DateTime | ValueKind::Status | ValueKind::Text => {
            !value.is_array() && !value.is_object()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(FieldDescriptor::date("d", "D").kind, ValueKind::Date);
        assert_eq!(FieldDescriptor::currency("c", "C").kind, ValueKind::Currency);
        let f = FieldDescriptor::text("vehicles.reg_number", "Vehicle");
        assert_eq!(f.key, "vehicles.reg_number");
    }

    #[test]
    fn test_kind_matches() {
        assert!(kind_matches(&json!(12.5), ValueKind::Currency));
        assert!(kind_matches(&json!("150.00"), ValueKind::Currency));
        assert!(kind_matches(&json!(null), ValueKind::Number));
        assert!(!kind_matches(&json!({"a": 1}), ValueKind::Number));
        assert!(!kind_matches(&json!(["x"]), ValueKind::Text));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let s = serde_json::to_string(&ValueKind::DateTime).unwrap();
        assert_eq!(s, "\"date_time\"");
    }
}
