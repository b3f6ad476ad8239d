//! Runner error types.

use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Settings are missing or invalid.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The GitLab client could not be built.
    #[error(transparent)]
    GitLab(#[from] crate::gitlab::GitLabError),

    /// The Jira client could not be built.
    #[error(transparent)]
    Jira(#[from] crate::jira::JiraError),

    /// Correlation failed.
    #[error(transparent)]
    Correlation(#[from] crate::correlation::CorrelationError),

    /// The comment template is invalid.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Reading or writing the snapshot failed.
    #[error(transparent)]
    Snapshot(#[from] crate::snapshot::SnapshotError),

    /// Pushing comments was cancelled.
    #[error(transparent)]
    Upsert(#[from] crate::comments::UpsertError),
}
