//! Application-level errors (wraps domain and transport errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::TransportError;

/// Application errors wrap domain errors and add API-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Non-2xx answer; the body is surfaced as-is.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("{operation}: {source}")]
    Transport {
        operation: String,
        #[source]
        source: TransportError,
    },

    #[error("unexpected response from {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// API error from a status and raw body. An empty body is replaced with
    /// the canonical reason phrase so the message never ends in a colon.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let body = body.into().trim().to_string();
        let body = if body.is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("no response body")
                .to_string()
        } else {
            body
        };
        Self::Api { status, body }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_status_and_body() {
        let err = ApplicationError::api(401, "invalid key");
        assert_eq!(err.to_string(), "HTTP 401: invalid key");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn api_error_with_empty_body_uses_reason_phrase() {
        let err = ApplicationError::api(404, "  ");
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }
}
