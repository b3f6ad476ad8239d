//! Correlation error types.

use crate::pagination::PaginationError;
use thiserror::Error;

/// Errors that abort building the correlation map.
#[derive(Debug, Error)]
pub enum CorrelationError {
    /// A configured pattern does not compile.
    #[error("Invalid {name} pattern '{pattern}': {source}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A configured pattern lacks a required named group.
    #[error("The {name} pattern '{pattern}' has no named group '{group}'")]
    MissingCaptureGroup {
        name: &'static str,
        pattern: String,
        group: &'static str,
    },

    /// None of the listed projects matched the project allow-list.
    #[error("No projects selected by {selectors:?}")]
    NoProjectsSelected { selectors: Vec<String> },

    /// Listing projects, merge requests or notes failed.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}
