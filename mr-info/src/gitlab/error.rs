//! GitLab client error types.

use thiserror::Error;

/// Errors returned by the GitLab API client.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Transport or decoding failure.
    #[error("GitLab request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The token cannot be used as a header value.
    #[error("GitLab token contains characters that are not allowed in a header")]
    InvalidToken,

    /// GitLab answered with a non-success status.
    #[error("GitLab API error on {endpoint} ({status}): {message}")]
    Api {
        status: u16,
        endpoint: String,
        message: String,
    },
}
