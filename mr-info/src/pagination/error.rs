//! Pagination error types.

use thiserror::Error;

/// Errors that abort the collection of a paged resource.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// A single page request failed.
    #[error("Failed to fetch page {cursor} of {collection}: {source}")]
    Source {
        collection: String,
        cursor: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The upstream kept reporting further pages past the request ceiling.
    #[error("Too many pages while listing {collection} (limit {limit})")]
    TooManyPages { collection: String, limit: usize },

    /// The run was cancelled while a page was being fetched.
    #[error("Cancelled while listing {collection}")]
    Cancelled { collection: String },
}
