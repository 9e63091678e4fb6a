use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the Twitter client.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// The credentials file could not be read.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// A credentials file or response body was not the JSON we expected.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Credentials or client settings are unusable.
    #[error("invalid twitter config: {0}")]
    InvalidConfig(String),
    /// A request argument was rejected before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Transport-level failure (DNS, connect, timeout, TLS).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The token endpoint refused us or returned something other than a bearer token.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The API answered with a non-success status.
    #[error("api returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl TwitterError {
    /// Whether repeating the same request could succeed.
    ///
    /// Transport timeouts and connection failures, `429 Too Many Requests`
    /// and 5xx responses are retryable. Everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            TwitterError::Http(err) => err.is_timeout() || err.is_connect(),
            TwitterError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            TwitterError::Io(_)
            | TwitterError::Json(_)
            | TwitterError::InvalidConfig(_)
            | TwitterError::InvalidRequest(_)
            | TwitterError::Auth(_) => false,
        }
    }
}
