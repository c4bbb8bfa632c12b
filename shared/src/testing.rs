//! In-memory fakes for the record store and mailer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use crate::email::Email;
use crate::models::AppointmentRequest;
use crate::notify::Mailer;
use crate::store::RecordStore;
use crate::{Error, Result};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AppointmentRequest>>,
    unconfigured: bool,
    broken: bool,
}

impl MemoryStore {
    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<AppointmentRequest> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.unconfigured {
            return Err(Error::StoreNotConfigured);
        }
        if self.broken {
            return Err(Error::Storage("connection reset".into()));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    async fn put(&self, record: &AppointmentRequest) -> Result<()> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::Storage("conditional check failed".into()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn scan(&self, limit: i32) -> Result<Vec<Value>> {
        self.check()?;
        let records = self.records.lock().unwrap();
        records
            .iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|r| serde_json::to_value(r).map_err(Error::from))
            .collect()
    }
}

#[derive(Default)]
pub struct FakeMailer {
    sent: Mutex<Vec<Email>>,
    attempts: AtomicUsize,
    failing: bool,
}

impl FakeMailer {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Mailer for FakeMailer {
    async fn send(&self, email: &Email) -> Result<String> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Error::Email("mailbox unavailable".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(format!("fake-message-{}", attempt))
    }
}

/// Build a request the way the runtime does from an API Gateway REST proxy
/// event deployed on the `prod` stage.
pub fn rest_api_event(
    method: &str,
    path: &str,
    query: Option<(&str, &str)>,
    body: &str,
) -> lambda_http::Request {
    let query_params = query.map(|(k, v)| {
        Value::Object(serde_json::Map::from_iter([(k.to_string(), Value::from(v))]))
    });
    let multi_query_params = query.map(|(k, v)| {
        Value::Object(serde_json::Map::from_iter([(k.to_string(), Value::from(vec![v]))]))
    });
    let body = if body.is_empty() {
        Value::Null
    } else {
        Value::from(body)
    };
    let host = "abc123.execute-api.us-east-1.amazonaws.com";

    let event = serde_json::json!({
        "resource": "/{proxy+}",
        "path": path,
        "httpMethod": method,
        "headers": {
            "Content-Type": "application/json",
            "Host": host,
        },
        "multiValueHeaders": {
            "Content-Type": ["application/json"],
            "Host": [host],
        },
        "queryStringParameters": query_params,
        "multiValueQueryStringParameters": multi_query_params,
        "pathParameters": { "proxy": path.trim_start_matches('/') },
        "stageVariables": null,
        "requestContext": {
            "accountId": "123456789012",
            "resourceId": "abc123",
            "stage": "prod",
            "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
            "identity": {
                "sourceIp": "203.0.113.10",
                "userAgent": "Mozilla/5.0",
            },
            "resourcePath": "/{proxy+}",
            "httpMethod": method,
            "apiId": "abc123",
            "path": format!("/prod{}", path),
            "protocol": "HTTP/1.1",
            "requestTimeEpoch": 1760000000000_i64,
        },
        "body": body,
        "isBase64Encoded": false,
    });

    lambda_http::request::from_str(&event.to_string()).unwrap()
}
