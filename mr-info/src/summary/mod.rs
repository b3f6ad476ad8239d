//! Run summary types and helpers.

mod outcome;
mod run_summary;

pub use outcome::{CommentOutcome, IssueOutcome};
pub use run_summary::RunSummary;
