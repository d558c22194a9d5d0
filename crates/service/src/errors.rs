use thiserror::Error;
use tracing::error;

pub const SERVER_ERROR: &str = "Server error";

/// Outcome of a failed validation or forwarding step.
///
/// Each variant maps to exactly one response shape; see `server::errors`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Missing or malformed input; never forwarded upstream.
    #[error("validation error: {0}")]
    Validation(String),
    /// Upstream answered 401/403. The upstream body is dropped.
    #[error("upstream rejected the configured credentials")]
    UpstreamAuth,
    /// Any other non-success upstream status, relayed with its body text.
    #[error("{error} (upstream status {status})")]
    Upstream { error: String, status: u16, body: String },
    /// Upstream result set was empty or not a list.
    #[error("not found: {0}")]
    NotFound(String),
    /// Network failure, missing configuration or an unparsable success body.
    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}

/// The request URL carries configured secrets, so it stays in the server log
/// and is stripped from the text the caller sees.
impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        error!(error = ?e, "upstream request failed");
        Self::Unexpected(e.without_url().to_string())
    }
}
