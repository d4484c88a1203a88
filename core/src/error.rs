//! Error types for the Backlog client.
//!
//! # Design
//! Every failure reaches the caller of the operation unchanged; nothing is
//! retried or recovered locally. A non-2xx status and an undecodable body are
//! distinct variants so callers can tell "the server refused" from "the
//! server answered with something that is not JSON".

use thiserror::Error;

/// Errors returned by `BacklogClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside `200..300`. The raw body is
    /// kept for diagnostics and is never decoded.
    #[error("request failed: {status} {status_text}")]
    Request {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The response body is not valid JSON, or not of the requested shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The transport could not complete the exchange.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status of a `Request` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
