//! Dynamic records fetched from the fleet API
//!
//! Entities arrive as flat JSON objects whose shape is only known through the
//! entity catalog. A [`Record`] wraps the raw object and adds dotted-path
//! lookup so field descriptors like `vehicles.reg_number` can resolve into
//! nested objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entity instance (e.g. one driver) as a flat field mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Build a record from `(key, value)` pairs. Mostly useful in tests.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Resolve a field key against the record.
    ///
    /// Keys may be dotted paths (`vehicles.reg_number`) which descend into
    /// nested objects. Returns `None` when any segment is missing or when an
    /// intermediate value is not an object.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// The record's opaque identifier, stringified.
    ///
    /// The fleet API sends `id` as either a number or a string depending on
    /// the entity; both are accepted.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Iterate over the record's own top-level values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }
}

/// Stringify a JSON value for search matching.
///
/// Strings are used verbatim (no surrounding quotes); numbers, booleans and
/// nested structures fall back to their JSON serialization. `Null` becomes
/// the empty string so it never matches a non-empty query.
pub fn search_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
