//! Error taxonomy for API calls.
//!
//! ERROR HANDLING
//! ==============
//! Clients never swallow failures: every error propagates to the caller,
//! which decides how to present it. No retries, no fallbacks.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("{resource} does not support {operation}")]
    Unsupported { resource: &'static str, operation: &'static str },
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("login response did not include a token")]
    MissingToken,
}

impl ApiError {
    /// Build an [`ApiError::Http`] from a non-2xx response body.
    ///
    /// Uses the server's `{"status":"error","error":"..."}` message when
    /// present, otherwise the trimmed raw body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorEnvelope {
            error: String,
        }

        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| body.trim().to_owned());
        Self::Http { status, message }
    }

    /// HTTP status for [`ApiError::Http`], `None` for every other variant.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
