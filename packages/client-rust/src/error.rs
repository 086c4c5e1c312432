//! Client error type.

use propval_core::{ValidationError, ValidationErrorCode};

/// Errors returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ValidationError),
    /// Connection, TLS, or timeout failure below the HTTP status level.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("access token is required")]
    MissingAccessToken,
    #[error("access token provider failed: {0}")]
    TokenProvider(#[from] anyhow::Error),
    #[error("invalid value for header {name}")]
    InvalidHeader { name: &'static str },
    #[error("run {run_id} did not finish within {timeout_ms}ms")]
    RunWaitTimeout { run_id: String, timeout_ms: u64 },
}

impl ClientError {
    /// API error code, if this error came from an API response.
    #[must_use]
    pub fn api_code(&self) -> Option<ValidationErrorCode> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }
}
