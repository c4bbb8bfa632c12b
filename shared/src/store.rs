//! Record store for appointment requests.

use std::collections::HashMap;
use std::future::Future;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use crate::models::AppointmentRequest;
use crate::{Error, Result};

/// Durable storage for appointment requests.
pub trait RecordStore: Send + Sync {
    /// Store a new record. Never overwrites an existing id.
    fn put(&self, record: &AppointmentRequest) -> impl Future<Output = Result<()>> + Send;

    /// Return up to `limit` stored records as JSON objects, in store order.
    fn scan(&self, limit: i32) -> impl Future<Output = Result<Vec<Value>>> + Send;
}

/// DynamoDB-backed record store.
pub struct DynamoStore {
    client: DynamoClient,
    table_name: Option<String>,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, table_name: Option<String>) -> Self {
        Self { client, table_name }
    }

    fn table(&self) -> Result<&str> {
        self.table_name.as_deref().ok_or(Error::StoreNotConfigured)
    }
}

impl RecordStore for DynamoStore {
    async fn put(&self, record: &AppointmentRequest) -> Result<()> {
        let table = self.table()?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record_to_item(record)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to put item: {}", e)))?;

        info!(submission_id = %record.id, table = %table, "Stored appointment request");
        Ok(())
    }

    async fn scan(&self, limit: i32) -> Result<Vec<Value>> {
        let table = self.table()?;

        let output = self
            .client
            .scan()
            .table_name(table)
            .limit(limit)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to scan table: {}", e)))?;

        let items: Vec<Value> = output.items().iter().map(item_to_json).collect();
        debug!(table = %table, count = items.len(), "Scanned appointment requests");
        Ok(items)
    }
}

/// Flatten a record into a DynamoDB item of string attributes.
pub fn record_to_item(record: &AppointmentRequest) -> HashMap<String, AttributeValue> {
    let s = |v: &str| AttributeValue::S(v.to_string());

    HashMap::from([
        ("id".to_string(), s(&record.id.to_string())),
        ("createdAt".to_string(), s(&record.created_at_rfc3339())),
        ("fullName".to_string(), s(&record.full_name)),
        ("email".to_string(), s(&record.email)),
        ("phone".to_string(), s(&record.phone)),
        ("serviceType".to_string(), s(&record.service_type)),
        ("preferredDate".to_string(), s(&record.preferred_date)),
        ("preferredTime".to_string(), s(&record.preferred_time)),
        ("additionalDetails".to_string(), s(&record.additional_details)),
        ("status".to_string(), s(&record.status)),
        ("source".to_string(), s(&record.source)),
    ])
}

/// Convert a DynamoDB item to a JSON object.
pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Value {
    Value::Object(
        item.iter()
            .map(|(key, value)| (key.clone(), attribute_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

/// Numbers come back as decimal strings; they are normalized to `f64`.
fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => item_to_json(map),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_to_json(n)).collect()),
        AttributeValue::B(blob) => Value::String(BASE64.encode(blob.as_ref())),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(BASE64.encode(blob.as_ref())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn number_to_json(n: &str) -> Value {
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}
