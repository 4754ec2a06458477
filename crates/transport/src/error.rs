//! Error types for the transport

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::http::HttpResponse;

/// Result type alias for transport operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Shared, cloneable source error for failures below the HTTP layer
pub type NetworkSource = Arc<dyn std::error::Error + Send + Sync>;

/// Transport errors
///
/// Every variant is cheap to clone so a single outcome can be handed to all
/// callers that joined the same in-flight GET.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// No response was obtained (DNS, connection reset, body read failure)
    #[error("HTTP request failed: {0}")]
    Network(#[source] NetworkSource),

    /// The API answered with a status outside `[200, 300)`
    #[error("API error: {0}")]
    Http(ErrorPayload),

    /// The request was aborted through its cancellation token
    #[error("Request cancelled")]
    Cancelled,

    /// The configured token provider failed
    #[error("Token provider failed: {0}")]
    Token(String),

    /// Request path does not start with `/`
    #[error("Invalid path {0:?}: paths must start with '/'")]
    InvalidPath(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request payload could not be serialized
    #[error("JSON error: {0}")]
    Json(#[source] Arc<serde_json::Error>),
}

impl ApiError {
    /// Create a network error from any underlying error
    pub fn network(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(source))
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a token provider error
    pub fn token(msg: impl Into<String>) -> Self {
        Self::Token(msg.into())
    }

    /// HTTP status carried by this error, if the API answered at all
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(payload) => Some(payload.status),
            _ => None,
        }
    }

    /// Diagnostic payload of an HTTP error
    #[must_use]
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Http(payload) => Some(payload),
            _ => None,
        }
    }

    /// Check if the request was cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if the API rejected the credentials (401)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}

/// Diagnostic data attached to an unsuccessful response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status
    #[serde(rename = "statusText")]
    pub status_text: String,
    /// Response body, when it parsed as JSON
    pub body: Option<Value>,
}

impl ErrorPayload {
    /// Build a payload from a response, parsing the body on a best-effort basis
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        Self {
            status: response.status,
            status_text: response.status_text.clone(),
            body: serde_json::from_str(&response.body).ok(),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        if !self.status_text.is_empty() {
            write!(f, " {}", self.status_text)?;
        }
        Ok(())
    }
}
