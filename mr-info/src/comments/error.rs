//! Comment upsert error types.

use thiserror::Error;

/// Errors that abort the comment upsert.
///
/// Failures of individual issues or comments are not errors; they are
/// reported as outcomes in the run summary.
#[derive(Debug, Error)]
pub enum UpsertError {
    /// The run was cancelled.
    #[error("Cancelled while updating Jira comments")]
    Cancelled,
}
