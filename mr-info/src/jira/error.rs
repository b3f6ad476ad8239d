//! Jira client error types.

use crate::pagination::PaginationError;
use thiserror::Error;

/// Errors returned by the Jira API client.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Transport or decoding failure.
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The token cannot be used as a header value.
    #[error("Jira token contains characters that are not allowed in a header")]
    InvalidToken,

    /// Jira answered with a non-success status.
    #[error("Jira API error on {endpoint} ({status}): {message}")]
    Api {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// Listing the remaining comments of an issue failed.
    #[error(transparent)]
    Comments(#[from] PaginationError),
}
