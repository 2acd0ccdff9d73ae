//! DynamoDB-backed table source
//!
//! Wraps the AWS SDK client. Credential resolution is delegated entirely to
//! the shared-config profile mechanism (`~/.aws/config` / `~/.aws/credentials`),
//! so no environment variables are consulted here directly and no timeouts
//! are configured beyond the SDK defaults.

use crate::error::{ScanError, ScanResult};
use crate::record::Record;
use crate::scan::{ScanFilter, ScanPage, TableInfo, TableSource};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// A DynamoDB table reachable through a named credential profile
pub struct DynamoTableSource {
    client: Client,
    table: String,
}

impl DynamoTableSource {
    /// Connect using the given profile name. The SDK resolves region and
    /// credentials from the profile; failures surface on the first request.
    pub async fn connect(profile: &str, table: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .profile_name(profile)
            .load()
            .await;

        Self {
            client: Client::new(&config),
            table: table.to_string(),
        }
    }
}

#[async_trait]
impl TableSource for DynamoTableSource {
    type Key = HashMap<String, AttributeValue>;

    async fn describe(&self) -> ScanResult<TableInfo> {
        let resp = self
            .client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(|e| ScanError::DescribeFailed {
                table: self.table.clone(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        let table = resp.table.ok_or_else(|| ScanError::MissingDescription {
            table: self.table.clone(),
        })?;

        let key_attributes = table
            .attribute_definitions()
            .iter()
            .map(|def| def.attribute_name().to_string())
            .collect();

        Ok(TableInfo {
            key_attributes,
            item_count: table.item_count().unwrap_or(0).max(0) as u64,
        })
    }

    async fn scan_page(
        &self,
        filter: Option<&ScanFilter>,
        start_key: Option<Self::Key>,
    ) -> ScanResult<Option<ScanPage<Self::Key>>> {
        let mut request = self.client.scan().table_name(&self.table);

        if let Some(filter) = filter {
            request = request
                .filter_expression("#attr = :val")
                .expression_attribute_names("#attr", filter.attribute())
                .expression_attribute_values(
                    ":val",
                    AttributeValue::S(filter.value().to_string()),
                );
        }

        if start_key.is_some() {
            request = request.set_exclusive_start_key(start_key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ScanError::ScanFailed {
                table: self.table.clone(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        let records: Vec<Record> = resp
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_record)
            .collect();

        debug!(
            page_records = records.len(),
            has_more = resp.last_evaluated_key.is_some(),
            "Fetched scan page"
        );

        Ok(Some(ScanPage {
            records,
            last_key: resp.last_evaluated_key,
        }))
    }
}

/// Convert one wire item to a record.
///
/// The SDK surfaces items as unordered maps, so field names are sorted to
/// keep record order (and with it the exported schema) deterministic.
fn item_to_record(item: HashMap<String, AttributeValue>) -> Record {
    let mut pairs: Vec<_> = item.into_iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .into_iter()
        .map(|(name, value)| (name, attribute_to_value(value)))
        .collect()
}

/// Map a DynamoDB attribute to a JSON value, preserving type fidelity.
/// Binary payloads become base64 text.
fn attribute_to_value(attr: AttributeValue) -> Value {
    match attr {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => number_to_value(n),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(BASE64.encode(blob.as_ref())),
        AttributeValue::Ss(items) => Value::Array(items.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(items) => Value::Array(items.into_iter().map(number_to_value).collect()),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .into_iter()
                .map(|blob| Value::String(BASE64.encode(blob.as_ref())))
                .collect(),
        ),
        AttributeValue::L(items) => {
            Value::Array(items.into_iter().map(attribute_to_value).collect())
        }
        AttributeValue::M(map) => {
            let mut pairs: Vec<_> = map.into_iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                pairs
                    .into_iter()
                    .map(|(name, value)| (name, attribute_to_value(value)))
                    .collect(),
            )
        }
        // Variants this export has no mapping for (and future additions)
        _ => Value::Null,
    }
}

/// DynamoDB numbers arrive as decimal strings. Keep them as JSON numbers
/// only when the text round-trips exactly, so high-precision decimals are
/// never mangled by a float detour.
fn number_to_value(text: String) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        if n.to_string() == text {
            return Value::from(n);
        }
    }
    if let Ok(f) = text.parse::<f64>() {
        if f.is_finite() && f.to_string() == text {
            if let Some(n) = serde_json::Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }
    Value::String(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_round_trip() {
        assert_eq!(number_to_value("42".into()), json!(42));
        assert_eq!(number_to_value("-7".into()), json!(-7));
        assert_eq!(number_to_value("1.5".into()), json!(1.5));
        // High-precision decimal stays textual rather than losing digits
        assert_eq!(
            number_to_value("3.14159265358979323846".into()),
            json!("3.14159265358979323846")
        );
    }

    #[test]
    fn test_attribute_mapping() {
        assert_eq!(
            attribute_to_value(AttributeValue::S("hi".into())),
            json!("hi")
        );
        assert_eq!(attribute_to_value(AttributeValue::Bool(true)), json!(true));
        assert_eq!(attribute_to_value(AttributeValue::Null(true)), Value::Null);
        assert_eq!(
            attribute_to_value(AttributeValue::Ss(vec!["a".into(), "b".into()])),
            json!(["a", "b"])
        );
        assert_eq!(
            attribute_to_value(AttributeValue::L(vec![
                AttributeValue::N("1".into()),
                AttributeValue::S("x".into()),
            ])),
            json!([1, "x"])
        );
    }

    #[test]
    fn test_item_order_is_deterministic() {
        let mut item = HashMap::new();
        item.insert("b".to_string(), AttributeValue::S("2".into()));
        item.insert("a".to_string(), AttributeValue::S("1".into()));
        item.insert("c".to_string(), AttributeValue::S("3".into()));

        let record = item_to_record(item);
        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
