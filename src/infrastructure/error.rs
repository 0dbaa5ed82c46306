//! Infrastructure-level errors (HTTP transport failures)

use thiserror::Error;

/// Failures below the HTTP status line: the request never produced a response.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to build HTTP client: {message}")]
    Build { message: String },

    #[error("invalid request URL: {message}")]
    Url { message: String },

    #[error("request timed out: {message}")]
    Timeout { message: String },

    #[error("connection failed: {message}")]
    Connect { message: String },

    #[error("request failed: {message}")]
    Request { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let (is_builder, is_timeout, is_connect) = (e.is_builder(), e.is_timeout(), e.is_connect());
        // Strip the URL: it carries key and token as query parameters.
        let message = e.without_url().to_string();
        if is_builder {
            TransportError::Build { message }
        } else if is_timeout {
            TransportError::Timeout { message }
        } else if is_connect {
            TransportError::Connect { message }
        } else {
            TransportError::Request { message }
        }
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
