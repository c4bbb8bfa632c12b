//! Shared data models.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Lifecycle status given to every new request.
pub const STATUS_NEW: &str = "new";

/// Channel tag for requests coming from the site form.
pub const SOURCE_WEBSITE: &str = "website";

/// Contact form payload as posted by the site.
///
/// Every field is optional here so that a missing field surfaces as a
/// validation error naming it, rather than as a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service_type: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub additional_details: Option<String>,
}

impl ContactSubmission {
    /// Check required fields in declaration order.
    ///
    /// The first absent, null, empty or whitespace-only field is named in the
    /// error. A whitespace-only value counts as missing, unlike a plain
    /// truthiness check. Values of the wrong JSON type never get here: they
    /// fail parsing and are reported as a malformed body, so `0` or `false`
    /// is a 400 "Invalid JSON in request body" rather than a missing field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("serviceType", &self.service_type),
        ];

        for (field, value) in required {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                return Err(Error::Validation(format!("Missing required field: {}", field)));
            }
        }

        Ok(())
    }
}

/// A stored appointment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub additional_details: String,
    pub status: String,
    pub source: String,
}

impl AppointmentRequest {
    /// Build a new record from a submission, validating it first.
    pub fn new(submission: ContactSubmission, id: Uuid, created_at: DateTime<Utc>) -> Result<Self> {
        submission.validate()?;

        Ok(Self {
            id,
            created_at,
            full_name: submission.full_name.unwrap_or_default(),
            email: submission.email.unwrap_or_default(),
            phone: submission.phone.unwrap_or_default(),
            service_type: submission.service_type.unwrap_or_default(),
            preferred_date: submission.preferred_date.unwrap_or_default(),
            preferred_time: submission.preferred_time.unwrap_or_default(),
            additional_details: submission.additional_details.unwrap_or_default(),
            status: STATUS_NEW.to_string(),
            source: SOURCE_WEBSITE.to_string(),
        })
    }

    /// Creation time in the format written to the store.
    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Successful create response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub id: Uuid,
}

impl SubmissionReceipt {
    pub fn new(id: Uuid) -> Self {
        Self {
            message: "Appointment request submitted successfully".to_string(),
            id,
        }
    }
}

/// Successful list response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionList {
    pub submissions: Vec<serde_json::Value>,
    pub count: usize,
}

impl From<Vec<serde_json::Value>> for SubmissionList {
    fn from(submissions: Vec<serde_json::Value>) -> Self {
        Self {
            count: submissions.len(),
            submissions,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
