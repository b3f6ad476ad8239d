//! Per-item outcomes of the comment upsert.

/// Result of looking up an issue before upserting its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The issue was loaded and its merge requests processed.
    Processed {
        /// Issue key.
        issue: String,
    },

    /// The issue does not exist; its merge requests were skipped.
    Missing {
        /// Issue key.
        issue: String,
        /// Number of merge requests skipped with it.
        skipped: usize,
    },

    /// Loading the issue failed; its merge requests were skipped.
    Failed {
        /// Issue key.
        issue: String,
        /// Number of merge requests skipped with it.
        skipped: usize,
        /// Error message.
        error: String,
    },
}

/// Result of upserting the comment for one merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    /// A new comment was added.
    Created {
        /// Issue key.
        issue: String,
        /// Id of the new comment.
        comment_id: String,
    },

    /// An existing comment was replaced.
    Updated {
        /// Issue key.
        issue: String,
        /// Id of the replaced comment.
        comment_id: String,
    },

    /// Dry run: the action that would have been taken.
    Planned {
        /// Issue key.
        issue: String,
        /// Comment that would be replaced, `None` for a new comment.
        comment_id: Option<String>,
    },

    /// Rendering, creating or updating failed.
    Failed {
        /// Issue key.
        issue: String,
        /// Merge request URL.
        url: String,
        /// Error message.
        error: String,
    },
}
