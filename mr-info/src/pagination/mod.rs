//! Exhaustive collection of paged list endpoints.
//!
//! Both GitLab (page numbers) and Jira (item offsets) expose their lists as a
//! sequence of pages with an opaque "next" cursor. [`fetch_all_pages`] follows
//! that cursor until the upstream reports the last page.

mod error;

pub use error::PaginationError;

use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Upper bound on page requests for a single collection.
pub const MAX_PAGE_REQUESTS: usize = 1000;

/// Number of items requested per page unless configured otherwise.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// One page of a paged collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in upstream order.
    pub items: Vec<T>,

    /// Cursor of the next page, `None` on the last page.
    pub next: Option<u32>,
}

impl<T> Page<T> {
    /// Creates a page that is followed by `next`.
    pub fn new(items: Vec<T>, next: Option<u32>) -> Self {
        Self { items, next }
    }

    /// Creates the final page of a collection.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Fetches every page of a collection and concatenates the items.
///
/// `fetch` is called with `first`, then with each returned `next` cursor, until
/// a page without a next cursor is seen.
///
/// # Errors
///
/// Any failing page request is returned as [`PaginationError::Source`]; no
/// partial result is produced. More than [`MAX_PAGE_REQUESTS`] requests yield
/// [`PaginationError::TooManyPages`], and cancelling `cancel` yields
/// [`PaginationError::Cancelled`].
pub async fn fetch_all_pages<T, E, F, Fut>(
    collection: &str,
    first: u32,
    cancel: &CancellationToken,
    mut fetch: F,
) -> Result<Vec<T>, PaginationError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut items = Vec::new();
    let mut cursor = first;

    for _ in 0..MAX_PAGE_REQUESTS {
        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(PaginationError::Cancelled {
                    collection: collection.to_string(),
                });
            }
            page = fetch(cursor) => page.map_err(|e| PaginationError::Source {
                collection: collection.to_string(),
                cursor,
                source: Box::new(e),
            })?,
        };

        debug!(
            collection,
            cursor,
            count = page.items.len(),
            next = ?page.next,
            "Fetched page"
        );
        items.extend(page.items);

        match page.next {
            Some(next) => cursor = next,
            None => return Ok(items),
        }
    }

    warn!(collection, limit = MAX_PAGE_REQUESTS, "Page limit reached");
    Err(PaginationError::TooManyPages {
        collection: collection.to_string(),
        limit: MAX_PAGE_REQUESTS,
    })
}
