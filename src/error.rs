//! Error types
//!
//! Every fallible operation in the crate returns [`Error`]. Validation
//! failures and transport failures are kept apart so callers can tell a
//! malformed payload from a failed round trip.

use thiserror::Error;

/// Message returned when a declared field is written after construction.
pub const IMMUTABLE_MESSAGE: &str = "This object is immutable.";

/// A resource failed its field constraints, or a frozen field was written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error raised by writes to a declared field
    pub fn immutable() -> Self {
        Self::new(IMMUTABLE_MESSAGE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure of the HTTP round trip itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API request failed: {status}{}", format_reasons(.reasons))]
    Status {
        status: reqwest::StatusCode,
        reasons: Vec<String>,
    },

    /// The body could not be read or was not the JSON object we expected
    #[error("Failed to parse response: {0}")]
    Body(String),

    /// The base URL and an endpoint could not be joined
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

fn format_reasons(reasons: &[String]) -> String {
    if reasons.is_empty() {
        String::new()
    } else {
        format!(" ({})", reasons.join("; "))
    }
}

impl TransportError {
    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(err) => err.status(),
            _ => None,
        }
    }
}

/// Crate-wide error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The object was deleted remotely and no longer backs a live resource
    #[error("Object at {endpoint} has been deleted")]
    Stale { endpoint: String },

    /// An item operation was attempted on an object without an `id`
    #[error("Object in {collection} has no id")]
    MissingId { collection: &'static str },
}

impl Error {
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Transport(TransportError::Url(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_message_verbatim() {
        let err = ValidationError::new("[flag] This value should not be null.");
        assert_eq!(err.to_string(), "[flag] This value should not be null.");
        assert_eq!(ValidationError::immutable().message(), IMMUTABLE_MESSAGE);
    }

    #[test]
    fn test_status_error_lists_reasons() {
        let err = TransportError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            reasons: vec!["label is too short".to_string(), "group is invalid".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "API request failed: 400 Bad Request (label is too short; group is invalid)"
        );
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_error_wraps_validation_transparently() {
        let err: Error = ValidationError::immutable().into();
        assert_eq!(err.to_string(), IMMUTABLE_MESSAGE);
        assert!(err.as_validation().is_some());
        assert!(err.as_transport().is_none());
    }

    #[test]
    fn test_missing_id_names_collection() {
        let err = Error::MissingId {
            collection: "/linodes",
        };
        assert_eq!(err.to_string(), "Object in /linodes has no id");
        assert!(err.as_validation().is_none());
        assert!(err.as_transport().is_none());
    }
}
