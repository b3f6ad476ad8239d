//! Jira issue tracker access.
//!
//! The upsert engine talks to Jira through [`IssueTracker`]; [`JiraClient`] is
//! the REST implementation.

mod client;
mod error;
mod models;

pub use client::JiraClient;
pub use error::JiraError;
pub use models::{Comment, TrackedIssue};

use async_trait::async_trait;

/// Read and write access to issue comments.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches an issue and all of its comments; `Ok(None)` if it does not exist.
    async fn issue(&self, key: &str) -> Result<Option<TrackedIssue>, JiraError>;

    /// Adds a comment to an issue and returns the created comment.
    async fn add_comment(&self, issue_key: &str, body: &str) -> Result<Comment, JiraError>;

    /// Replaces the body of an existing comment.
    async fn update_comment(
        &self,
        issue_key: &str,
        comment_id: &str,
        body: &str,
    ) -> Result<Comment, JiraError>;
}
