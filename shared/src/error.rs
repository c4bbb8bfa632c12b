//! Error types for the Poli Notary Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling a site or contact request.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing or a parameter is out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed into the expected shape
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Record store call failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// No record table is configured for this deployment
    #[error("Storage error: record table not configured")]
    StoreNotConfigured,

    /// Unknown route
    #[error("Not found: {0}")]
    NotFound(String),

    /// Email could not be built or delivered
    #[error("Email error: {0}")]
    Email(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) | Error::MalformedRequest(_) => 400,
            Error::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Returns `None` for faults whose detail must stay in the logs; the
    /// router substitutes a generic message for those.
    pub fn client_message(&self) -> Option<String> {
        match self {
            Error::Validation(message) => Some(message.clone()),
            Error::MalformedRequest(_) => Some("Invalid JSON in request body".to_string()),
            Error::NotFound(_) => Some("Endpoint not found".to_string()),
            Error::StoreNotConfigured => Some("Database not configured".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("x".into()).status_code(), 400);
        assert_eq!(Error::MalformedRequest("x".into()).status_code(), 400);
        assert_eq!(Error::NotFound("/x".into()).status_code(), 404);
        assert_eq!(Error::Storage("x".into()).status_code(), 500);
        assert_eq!(Error::StoreNotConfigured.status_code(), 500);
        assert_eq!(Error::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = Error::Storage("ResourceNotFoundException: table poli-notary".into());
        assert_eq!(err.client_message(), None);

        let err = Error::Validation("Missing required field: email".into());
        assert_eq!(err.client_message().as_deref(), Some("Missing required field: email"));
    }
}
