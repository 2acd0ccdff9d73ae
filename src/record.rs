//! Record and field-order model
//!
//! Table items are heterogeneous: any two records may carry different field
//! sets. A record is therefore an insertion-ordered map from field name to a
//! JSON value, which preserves string/number/bool/null/nested fidelity until
//! the serialization boundary, where everything is coerced to text.
//!
//! `FieldOrder` is the accumulator for the output schema: the table's
//! declared key attributes first, then every additional field name in the
//! order it was first seen. Growth is union-only - a name is never removed.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// A single table item: field name -> value, in source insertion order
pub type Record = IndexMap<String, Value>;

/// Ordered field-name accumulator for the output schema
#[derive(Debug, Clone)]
pub struct FieldOrder {
    names: IndexSet<String>,
}

impl FieldOrder {
    /// Create a field order seeded with the table's declared key attributes
    pub fn with_declared_keys<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            names: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Union the field names of a record into the accumulator.
    /// Already-known names keep their position; new names append in
    /// first-seen order.
    pub fn observe(&mut self, record: &Record) {
        for name in record.keys() {
            if !self.names.contains(name) {
                self.names.insert(name.clone());
            }
        }
    }

    /// Number of distinct field names seen so far
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no field names have been recorded
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate field names in schema order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Field names as an owned vector, in schema order
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

/// The aggregate produced by one export run: all fetched records plus the
/// ordered field-name list. Not persisted; the output file is the only
/// durable artifact.
#[derive(Debug)]
pub struct ExportResult {
    /// All records fetched across every page, cleaned
    pub records: Vec<Record>,

    /// Declared keys first, then extra fields in first-seen order
    pub field_order: FieldOrder,
}

/// Coerce a value to its textual form at the serialization boundary.
///
/// Strings pass through without quotes; numbers, booleans, null, and nested
/// structures use their compact JSON text. Deliberately lossy - both output
/// formats are flat string-valued.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_declared_keys_come_first() {
        let mut order = FieldOrder::with_declared_keys(["id", "sort"]);
        order.observe(&record(&[
            ("extra", json!("x")),
            ("id", json!("1")),
        ]));
        order.observe(&record(&[("later", json!(2))]));

        let names = order.to_vec();
        assert_eq!(names, vec!["id", "sort", "extra", "later"]);
    }

    #[test]
    fn test_union_only_no_duplicates() {
        let mut order = FieldOrder::with_declared_keys(["id"]);
        let rec = record(&[("id", json!("1")), ("name", json!("a"))]);
        order.observe(&rec);
        order.observe(&rec);

        assert_eq!(order.len(), 2);
        assert_eq!(order.to_vec(), vec!["id", "name"]);
    }

    #[test]
    fn test_first_seen_order_across_records() {
        let mut order = FieldOrder::with_declared_keys(["id"]);
        order.observe(&record(&[("b", json!(1))]));
        order.observe(&record(&[("a", json!(1)), ("b", json!(2))]));

        assert_eq!(order.to_vec(), vec!["id", "b", "a"]);
    }

    #[test]
    fn test_value_to_text_coercions() {
        assert_eq!(value_to_text(&json!("plain")), "plain");
        assert_eq!(value_to_text(&json!(42)), "42");
        assert_eq!(value_to_text(&json!(1.5)), "1.5");
        assert_eq!(value_to_text(&json!(true)), "true");
        assert_eq!(value_to_text(&Value::Null), "null");
        assert_eq!(value_to_text(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(value_to_text(&json!(["x", 2])), r#"["x",2]"#);
    }
}
