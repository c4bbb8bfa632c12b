//! Shared library for the Poli Notary Lambda functions.
//!
//! This crate provides the contact form service, its record store and notifier,
//! and the HTTP helpers used by both the contact and site functions.

pub mod config;
pub mod contact;
pub mod email;
pub mod error;
pub mod http;
pub mod models;
pub mod notify;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use contact::ContactService;
pub use email::{BusinessProfile, Email};
pub use error::{Error, Result};
pub use models::{AppointmentRequest, ContactSubmission, SubmissionList, SubmissionReceipt};
pub use notify::{Delivery, Mailer, Notifier, SesMailer};
pub use store::{DynamoStore, RecordStore};
