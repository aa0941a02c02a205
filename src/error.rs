//! Error types for the SDK.

use http::StatusCode;
use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur while talking to the service.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Credentials provider is misconfigured (no session attached, bad secret source)
    #[error("credentials error: {0}")]
    Credentials(String),

    /// Non-2xx response from the service
    #[error("HTTP {status} from {url}")]
    Http {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// Transport-level failure (connect, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request rejected locally before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid client configuration
    #[error("config error: {0}")]
    Config(String),

    /// A dispatched call panicked or was cancelled
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// An eager listing lost one or more pages
    #[error("incomplete results, failed pages {failed_pages:?}: {reason}")]
    IncompleteResults { failed_pages: Vec<u32>, reason: String },
}

impl SdkError {
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status of the failed call, if the failure came from the service.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SdkError::Http { status, .. } => Some(*status),
            SdkError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
