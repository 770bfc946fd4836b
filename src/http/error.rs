//! Error types for the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure while serving a single webfinger request.
///
/// Every variant is resolved into a response for that request only.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connection, DNS, or timeout failure talking to the upstream.
    #[error("{0}")]
    Upstream(#[source] reqwest::Error),

    /// The upstream answered but its body could not be read.
    #[error("{0}")]
    BodyRead(#[source] reqwest::Error),

    /// The rewritten document could not be serialized.
    #[error("failed to encode rewritten document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::BodyRead(_) | ProxyError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), format!("{self}\n")).into_response()
    }
}

/// Failure while building the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid href pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}
