#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod comments;
pub mod config;
pub mod correlation;
pub mod gitlab;
pub mod jira;
pub mod pagination;
pub mod runner;
pub mod snapshot;
pub mod summary;
pub mod templates;

pub use comments::{find_existing, CommentMarker, CommentUpserter, UpsertError};
pub use config::{ConfigError, GitLabSettings, JiraSettings, LoadedSettings, Settings};
pub use correlation::{fetch_selected_projects, CorrelationError, Correlator};
pub use gitlab::{GitLabClient, GitLabError, MergeRequestSource};
pub use jira::{IssueTracker, JiraClient, JiraError};
pub use pagination::{fetch_all_pages, Page, PaginationError};
pub use runner::{Mode, Runner, RunnerError};
pub use snapshot::{CorrelationMap, MergeRequestInfo, SnapshotError};
pub use summary::{CommentOutcome, IssueOutcome, RunSummary};
pub use templates::{CommentRenderer, TemplateError};
