//! Error types for the data clients.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Failure of a single request/response exchange.
///
/// Status codes are carried through untouched; callers decide what, if
/// anything, to make of them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed or the body could not be decoded
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status
    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    /// The client could not be built from its configuration
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Create a status error
    pub fn status(method: Method, url: impl Into<String>, status: StatusCode) -> Self {
        Self::Status {
            method,
            url: url.into(),
            status,
        }
    }

    /// HTTP status when the backend answered at all
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            Self::InvalidConfig(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::status(Method::DELETE, "http://localhost:8080/api/customers/2", StatusCode::NOT_FOUND);
        let text = err.to_string();
        assert!(text.contains("DELETE"));
        assert!(text.contains("/api/customers/2"));
        assert!(text.contains("404"));
        assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = ApiError::InvalidConfig("bad url".to_string());
        assert!(err.status_code().is_none());
    }
}
