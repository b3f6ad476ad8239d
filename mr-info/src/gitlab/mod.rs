//! GitLab merge request source.
//!
//! The correlation engine only needs three paged listings from GitLab; they are
//! expressed by [`MergeRequestSource`] so the engine can run against the real
//! [`GitLabClient`] or an in-memory source.

mod client;
mod error;
mod models;

pub use client::GitLabClient;
pub use error::GitLabError;
pub use models::{MergeRequest, MergeRequestState, Note, NoteAuthor, Project};

use crate::pagination::Page;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Paged access to projects, merge requests and notes.
///
/// Page cursors are 1-based page numbers.
#[async_trait]
pub trait MergeRequestSource: Send + Sync {
    /// Lists one page of the projects visible to the token.
    async fn projects_page(&self, page: u32, per_page: u32) -> Result<Page<Project>, GitLabError>;

    /// Lists one page of a project's merge requests updated after `updated_after`.
    async fn merge_requests_page(
        &self,
        project_id: u64,
        updated_after: DateTime<Utc>,
        page: u32,
        per_page: u32,
    ) -> Result<Page<MergeRequest>, GitLabError>;

    /// Lists one page of a merge request's notes.
    async fn notes_page(
        &self,
        project_id: u64,
        merge_request_iid: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Note>, GitLabError>;
}
