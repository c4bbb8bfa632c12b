//! Contact form API: accepts appointment requests and lists stored ones.
//!
//! Endpoints:
//! - OPTIONS * - CORS preflight
//! - POST /api/contact - Submit an appointment request
//! - GET /api/contact?limit=N - List stored requests

use chrono::Utc;
use lambda_http::{Body, Request, RequestExt, Response};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::http::{error_response, json_response, preflight_response, route_path};
use crate::models::{AppointmentRequest, ContactSubmission, SubmissionList, SubmissionReceipt};
use crate::notify::{Mailer, Notifier};
use crate::store::RecordStore;
use crate::{Error, Result};

pub const CONTACT_PATH: &str = "/api/contact";

/// Records returned by a list call when no limit is given.
pub const DEFAULT_LIST_LIMIT: i32 = 10;

/// Upper bound on a single list call.
///
/// Larger `limit` values are clamped to this, not rejected. The listing has
/// no pagination cursor, so callers cannot read past the first 100 records
/// of a scan.
pub const MAX_LIST_LIMIT: i32 = 100;

/// Handles contact submissions against an explicit store and notifier.
pub struct ContactService<S, M> {
    store: S,
    notifier: Notifier<M>,
}

impl<S: RecordStore, M: Mailer> ContactService<S, M> {
    pub fn new(store: S, notifier: Notifier<M>) -> Self {
        Self { store, notifier }
    }

    /// Validate and store a submission, then notify operator and client.
    ///
    /// Notification failures are logged and do not affect the result.
    pub async fn create(&self, body: &[u8]) -> Result<SubmissionReceipt> {
        let submission: ContactSubmission = if body.iter().all(u8::is_ascii_whitespace) {
            ContactSubmission::default()
        } else {
            serde_json::from_slice(body).map_err(|e| Error::MalformedRequest(e.to_string()))?
        };

        let record = AppointmentRequest::new(submission, Uuid::new_v4(), Utc::now())?;
        self.store.put(&record).await?;

        info!(
            submission_id = %record.id,
            service_type = %record.service_type,
            "Appointment request received"
        );

        let (operator, client) = tokio::join!(
            self.notifier.notify_operator(&record),
            self.notifier.notify_client(&record),
        );
        if !(operator.is_sent() && client.is_sent()) {
            warn!(
                submission_id = %record.id,
                operator_notified = operator.is_sent(),
                client_notified = client.is_sent(),
                "Request stored but not every notification was delivered"
            );
        }

        Ok(SubmissionReceipt::new(record.id))
    }

    /// List up to `limit` stored submissions.
    ///
    /// `limit` defaults to [`DEFAULT_LIST_LIMIT`] and is clamped to
    /// [`MAX_LIST_LIMIT`]. A non-numeric or non-positive value is a
    /// validation error (400).
    pub async fn list(&self, limit: Option<&str>) -> Result<SubmissionList> {
        let limit = parse_limit(limit)?;
        let submissions = self.store.scan(limit).await?;
        Ok(SubmissionList::from(submissions))
    }

    /// Dispatch a request by method and stage-relative path.
    pub async fn route(&self, event: &Request) -> std::result::Result<Response<Body>, lambda_http::Error> {
        let method = event.method().as_str();
        let path = route_path(event);

        info!(method = %method, path = %path, "Contact request");

        match (method, path) {
            ("OPTIONS", _) => preflight_response(),

            ("POST", CONTACT_PATH) => match self.create(event.body().as_ref()).await {
                Ok(receipt) => json_response(200, &receipt),
                Err(e) => failure_response(&e, "Failed to process submission"),
            },

            ("GET", CONTACT_PATH) => {
                let params = event.query_string_parameters();
                match self.list(params.first("limit")).await {
                    Ok(list) => json_response(200, &list),
                    Err(e) => failure_response(&e, "Failed to retrieve submissions"),
                }
            }

            _ => failure_response(&Error::NotFound(format!("{} {}", method, path)), "Endpoint not found"),
        }
    }

    /// Entry point for the Lambda runtime. Never leaks internal detail.
    pub async fn handle(&self, event: Request) -> std::result::Result<Response<Body>, lambda_http::Error> {
        match self.route(&event).await {
            Ok(response) => Ok(response),
            Err(e) => failure_response(&Error::Internal(e.to_string()), "Internal server error"),
        }
    }
}

fn parse_limit(raw: Option<&str>) -> Result<i32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LIST_LIMIT);
    };

    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n.min(i64::from(MAX_LIST_LIMIT)) as i32),
        _ => Err(Error::Validation(format!("Invalid limit: {}", raw))),
    }
}

fn failure_response(err: &Error, fallback: &str) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let status = err.status_code();
    if status >= 500 {
        error!(error = %err, "Contact request failed");
    } else {
        warn!(error = %err, "Contact request rejected");
    }
    error_response(status, err.client_message().unwrap_or_else(|| fallback.to_string()))
}
