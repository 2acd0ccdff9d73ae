//! JSON serialization
//!
//! A single UTF-8 array of flat objects. Every value is coerced to text -
//! numbers, booleans, and nested structures included - and each object keeps
//! the source record's field insertion order.

use crate::error::Result;
use crate::record::{value_to_text, ExportResult, Record};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the export as a JSON file at the given path
pub fn write_file(result: &ExportResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_to(result, BufWriter::new(file))
}

/// Write the export as JSON to any writer
pub fn write_to<W: Write>(result: &ExportResult, mut writer: W) -> Result<()> {
    let flat: Vec<IndexMap<&str, String>> =
        result.records.iter().map(stringify_record).collect();
    serde_json::to_writer(&mut writer, &flat)?;
    writer.flush()?;
    Ok(())
}

/// Apply the stringify-everything rule to one record
fn stringify_record(record: &Record) -> IndexMap<&str, String> {
    record
        .iter()
        .map(|(name, value)| (name.as_str(), value_to_text(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldOrder;
    use serde_json::{json, Value};

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn write_to_string(records: Vec<Record>) -> String {
        let mut field_order = FieldOrder::with_declared_keys(["id"]);
        for rec in &records {
            field_order.observe(rec);
        }
        let result = ExportResult {
            records,
            field_order,
        };
        let mut buf = Vec::new();
        write_to(&result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_every_leaf_is_a_string() {
        let text = write_to_string(vec![record(&[
            ("id", json!("1")),
            ("count", json!(42)),
            ("ok", json!(false)),
            ("nested", json!({"a": 1})),
            ("empty", Value::Null),
        ])]);

        let parsed: Value = serde_json::from_str(&text).unwrap();
        let objects = parsed.as_array().unwrap();
        assert_eq!(objects.len(), 1);
        for (_, value) in objects[0].as_object().unwrap() {
            assert!(value.is_string());
        }
        assert_eq!(objects[0]["count"], json!("42"));
        assert_eq!(objects[0]["ok"], json!("false"));
        assert_eq!(objects[0]["nested"], json!(r#"{"a":1}"#));
        assert_eq!(objects[0]["empty"], json!("null"));
    }

    #[test]
    fn test_object_keys_keep_insertion_order() {
        let text = write_to_string(vec![record(&[
            ("zulu", json!("z")),
            ("alpha", json!("a")),
            ("mike", json!("m")),
        ])]);

        let zulu = text.find("\"zulu\"").unwrap();
        let alpha = text.find("\"alpha\"").unwrap();
        let mike = text.find("\"mike\"").unwrap();
        assert!(zulu < alpha && alpha < mike);
    }

    #[test]
    fn test_empty_export_is_an_empty_array() {
        assert_eq!(write_to_string(Vec::new()), "[]");
    }
}
