//! Run summary types.

use super::{CommentOutcome, IssueOutcome};
use crate::correlation::ReleaseInfo;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of projects selected by the allow-list.
    pub projects_selected: usize,

    /// Number of merge requests listed across selected projects.
    pub merge_requests_scanned: usize,

    /// Merge requests whose title references no issue.
    pub merge_requests_unmatched: usize,

    /// Merge requests referencing an untargeted Jira project.
    pub merge_requests_ignored: usize,

    /// Merge requests added to the correlation map.
    pub merge_requests_correlated: usize,

    /// Correlated merge requests with a release version.
    pub release_versions_found: usize,

    /// Release versions found without a release link.
    pub release_urls_missing: usize,

    /// Issues loaded from Jira.
    pub issues_processed: usize,

    /// Issues that do not exist in Jira.
    pub issues_missing: usize,

    /// Issues that could not be loaded.
    pub issues_failed: usize,

    /// Merge requests skipped along with a missing or failed issue.
    pub comments_skipped: usize,

    /// Comments added.
    pub comments_created: usize,

    /// Comments replaced in place.
    pub comments_updated: usize,

    /// Comments that would have been added or replaced (dry run).
    pub comments_planned: usize,

    /// Comments that failed to render, add or replace.
    pub comments_failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Counts the release found for a correlated merge request.
    pub fn record_release(&mut self, release: &ReleaseInfo) {
        if release.version.is_some() {
            self.release_versions_found += 1;
        }
        if release.missing_url() {
            self.release_urls_missing += 1;
        }
    }

    /// Counts an issue lookup.
    pub fn record_issue(&mut self, outcome: &IssueOutcome) {
        match outcome {
            IssueOutcome::Processed { .. } => self.issues_processed += 1,
            IssueOutcome::Missing { skipped, .. } => {
                self.issues_missing += 1;
                self.comments_skipped += skipped;
            }
            IssueOutcome::Failed { skipped, .. } => {
                self.issues_failed += 1;
                self.comments_skipped += skipped;
            }
        }
    }

    /// Counts a comment upsert.
    pub fn record_comment(&mut self, outcome: &CommentOutcome) {
        match outcome {
            CommentOutcome::Created { .. } => self.comments_created += 1,
            CommentOutcome::Updated { .. } => self.comments_updated += 1,
            CommentOutcome::Planned { .. } => self.comments_planned += 1,
            CommentOutcome::Failed { .. } => self.comments_failed += 1,
        }
    }

    /// Returns true if any issue or comment failed.
    ///
    /// Missing issues are expected and do not count as failures.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.issues_failed > 0 || self.comments_failed > 0
    }
}
