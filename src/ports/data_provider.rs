//! Data Provider Port
//!
//! The seam between the normalizing adapters and the remote data API.
//! `TrackerApiClient` is the production implementation; tests substitute
//! mocks.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::address::AddressError;

/// Classified failures of a data request
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Bad address shape, detected before any network call
    #[error("Invalid Solana wallet address: {0}")]
    Validation(#[from] AddressError),

    /// Non-success HTTP response
    #[error("API Error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    /// DNS, connect, timeout or reset failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Success status but the body was not JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl TrackerError {
    /// HTTP status for `Api` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackerError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, TrackerError::Transport(_))
    }

    /// Whether offering the user a manual "try again" makes sense.
    /// Bad input will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            TrackerError::Transport(_) | TrackerError::Decode(_) => true,
            TrackerError::Api { status, .. } => *status == 429 || *status >= 500,
            TrackerError::Validation(_) | TrackerError::Client(_) => false,
        }
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TrackerError::Decode(err.to_string())
        } else if err.is_builder() {
            TrackerError::Client(err.to_string())
        } else if err.is_timeout() {
            TrackerError::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            TrackerError::Transport(format!("connection failed: {}", err))
        } else {
            TrackerError::Transport(err.to_string())
        }
    }
}

/// Issues a single GET against the data provider and returns the raw JSON
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackerDataPort: Send + Sync {
    /// `path` is appended to the provider base URL, e.g. `/wallet/<address>`
    async fn request(&self, path: &str) -> Result<Value, TrackerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = TrackerError::Api {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API Error: 404 Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_validation_error_display() {
        let err = TrackerError::from(AddressError::InvalidLength);
        assert_eq!(err.to_string(), "Invalid Solana wallet address: invalid length");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_retryable() {
        assert!(TrackerError::Transport("reset".into()).is_retryable());
        assert!(TrackerError::Api { status: 503, status_text: "Service Unavailable".into() }.is_retryable());
        assert!(TrackerError::Api { status: 429, status_text: "Too Many Requests".into() }.is_retryable());
        assert!(!TrackerError::Api { status: 404, status_text: "Not Found".into() }.is_retryable());
        assert!(!TrackerError::Validation(AddressError::Required).is_retryable());
    }
}
