//! Best-effort email notifications for new appointment requests.

use std::future::Future;

use aws_sdk_ses::types::{Body, Content, Destination, Message};
use aws_sdk_ses::Client as SesClient;
use tracing::{error, info};

use crate::email::{self, BusinessProfile, Email};
use crate::models::AppointmentRequest;
use crate::{Error, Result};

/// Outbound email delivery.
pub trait Mailer: Send + Sync {
    /// Send an email, returning the provider's message id.
    fn send(&self, email: &Email) -> impl Future<Output = Result<String>> + Send;
}

/// Mailer backed by Amazon SES.
pub struct SesMailer {
    client: SesClient,
    from_email: String,
}

impl SesMailer {
    pub fn new(client: SesClient, from_email: impl Into<String>) -> Self {
        Self {
            client,
            from_email: from_email.into(),
        }
    }
}

fn utf8_content(data: &str) -> Result<Content> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| Error::Email(format!("Failed to build content: {}", e)))
}

impl Mailer for SesMailer {
    async fn send(&self, email: &Email) -> Result<String> {
        let body = Body::builder()
            .html(utf8_content(&email.html)?)
            .text(utf8_content(&email.text)?)
            .build();

        let message = Message::builder()
            .subject(utf8_content(&email.subject)?)
            .body(body)
            .build();

        let destination = Destination::builder().to_addresses(&email.to).build();

        let result = self
            .client
            .send_email()
            .source(&self.from_email)
            .destination(destination)
            .message(message)
            .send()
            .await
            .map_err(|e| Error::Email(format!("Failed to send email: {}", e)))?;

        Ok(result.message_id().to_string())
    }
}

/// Outcome of a best-effort dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Sent { message_id: String },
    Failed { reason: String },
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent { .. })
    }
}

/// Sends the operator alert and the client confirmation.
pub struct Notifier<M> {
    mailer: M,
    profile: BusinessProfile,
}

impl<M: Mailer> Notifier<M> {
    pub fn new(mailer: M, profile: BusinessProfile) -> Self {
        Self { mailer, profile }
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    pub async fn notify_operator(&self, record: &AppointmentRequest) -> Delivery {
        let email = email::operator_alert(record, &self.profile);
        self.dispatch("operator_alert", record, &email).await
    }

    pub async fn notify_client(&self, record: &AppointmentRequest) -> Delivery {
        let email = email::client_confirmation(record, &self.profile);
        self.dispatch("client_confirmation", record, &email).await
    }

    /// Send one email, logging and swallowing any failure.
    async fn dispatch(&self, kind: &str, record: &AppointmentRequest, email: &Email) -> Delivery {
        match self.mailer.send(email).await {
            Ok(message_id) => {
                info!(
                    submission_id = %record.id,
                    kind = kind,
                    message_id = %message_id,
                    "Notification sent"
                );
                Delivery::Sent { message_id }
            }
            Err(e) => {
                error!(
                    submission_id = %record.id,
                    kind = kind,
                    error = %e,
                    "Failed to send notification"
                );
                Delivery::Failed { reason: e.to_string() }
            }
        }
    }
}
