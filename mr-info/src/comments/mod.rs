//! Idempotent Jira comment upsert.
//!
//! Every correlated merge request gets exactly one comment on its issue. A
//! comment written by an earlier run is found again via its marker (see
//! [`marker`]) and replaced in place; otherwise a new comment is added.

mod error;
pub mod marker;

pub use error::UpsertError;
pub use marker::{find_existing, CommentMarker};

use crate::config::JiraSettings;
use crate::jira::{Comment, IssueTracker, TrackedIssue};
use crate::snapshot::{CorrelationMap, MergeRequestInfo};
use crate::summary::{CommentOutcome, IssueOutcome, RunSummary};
use crate::templates::{CommentRenderer, TemplateError};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

/// Writes one comment per merge request to its Jira issue.
pub struct CommentUpserter {
    renderer: CommentRenderer,
    dry_run: bool,
}

impl CommentUpserter {
    /// Creates an upserter; in dry-run mode nothing is written to Jira.
    pub fn new(renderer: CommentRenderer, dry_run: bool) -> Self {
        Self { renderer, dry_run }
    }

    /// Creates an upserter using the configured comment template, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the custom template does not parse.
    pub fn from_settings(settings: &JiraSettings, dry_run: bool) -> Result<Self, TemplateError> {
        let renderer = match &settings.comment_template {
            Some(template) => CommentRenderer::with_template(template)?,
            None => CommentRenderer::new()?,
        };
        Ok(Self::new(renderer, dry_run))
    }

    /// Renders the full comment body, marker included.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails.
    pub fn render_body(&self, info: &MergeRequestInfo) -> Result<String, TemplateError> {
        let body = self.renderer.render(info)?;
        let marker = CommentMarker::for_merge_request(&info.url);
        Ok(format!("{}\n{}", body.trim_end(), marker.render()))
    }

    /// Upserts comments for every issue in `map`.
    ///
    /// Missing issues and failing comments are logged and counted in `summary`;
    /// they never abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`UpsertError::Cancelled`] if `cancel` fires.
    pub async fn upsert_all<T>(
        &self,
        tracker: &T,
        map: &CorrelationMap,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> Result<(), UpsertError>
    where
        T: IssueTracker + ?Sized,
    {
        for (key, infos) in map.iter() {
            let span = info_span!("issue", key = %key);
            self.upsert_issue(tracker, key, infos, cancel, summary)
                .instrument(span)
                .await?;
        }
        Ok(())
    }

    async fn upsert_issue<T>(
        &self,
        tracker: &T,
        key: &str,
        infos: &[MergeRequestInfo],
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> Result<(), UpsertError>
    where
        T: IssueTracker + ?Sized,
    {
        let mut issue = match cancellable(cancel, tracker.issue(key)).await? {
            Ok(Some(issue)) => issue,
            Ok(None) => {
                warn!(skipped = infos.len(), "Issue not found, skipping");
                summary.record_issue(&IssueOutcome::Missing {
                    issue: key.to_string(),
                    skipped: infos.len(),
                });
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, skipped = infos.len(), "Failed to get issue");
                summary.record_issue(&IssueOutcome::Failed {
                    issue: key.to_string(),
                    skipped: infos.len(),
                    error: e.to_string(),
                });
                return Ok(());
            }
        };
        summary.record_issue(&IssueOutcome::Processed {
            issue: key.to_string(),
        });

        for info in infos {
            let outcome = self.upsert_comment(tracker, &mut issue, info, cancel).await?;
            summary.record_comment(&outcome);
        }
        Ok(())
    }

    async fn upsert_comment<T>(
        &self,
        tracker: &T,
        issue: &mut TrackedIssue,
        info: &MergeRequestInfo,
        cancel: &CancellationToken,
    ) -> Result<CommentOutcome, UpsertError>
    where
        T: IssueTracker + ?Sized,
    {
        let key = issue.key.clone();
        let failed = |error: String| CommentOutcome::Failed {
            issue: key.clone(),
            url: info.url.clone(),
            error,
        };

        if info.url.is_empty() {
            warn!(title = %info.title, "Merge request has no URL, skipping comment");
            return Ok(failed("merge request has no URL".to_string()));
        }

        let body = match self.render_body(info) {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %info.url, error = %e, "Failed to render comment");
                return Ok(failed(e.to_string()));
            }
        };

        let existing = find_existing(&issue.comments, &info.url).map(|c| c.id.clone());

        if self.dry_run {
            info!(
                url = %info.url,
                comment_id = existing.as_deref().unwrap_or("new"),
                "[DRY RUN] Would upsert comment"
            );
            return Ok(CommentOutcome::Planned {
                issue: key.clone(),
                comment_id: existing,
            });
        }

        match existing {
            Some(comment_id) => {
                let result =
                    cancellable(cancel, tracker.update_comment(&key, &comment_id, &body))
                        .await?;
                match result {
                    Ok(_) => {
                        info!(url = %info.url, comment_id = %comment_id, "Updated comment");
                        if let Some(comment) =
                            issue.comments.iter_mut().find(|c| c.id == comment_id)
                        {
                            comment.body = body;
                        }
                        Ok(CommentOutcome::Updated {
                            issue: key.clone(),
                            comment_id,
                        })
                    }
                    Err(e) => {
                        warn!(url = %info.url, title = %info.title, error = %e, "Failed to update comment");
                        Ok(failed(e.to_string()))
                    }
                }
            }
            None => {
                let result = cancellable(cancel, tracker.add_comment(&key, &body)).await?;
                match result {
                    Ok(created) => {
                        info!(url = %info.url, comment_id = %created.id, "Added comment");
                        let comment_id = created.id.clone();
                        issue.comments.push(Comment {
                            id: created.id,
                            body,
                        });
                        Ok(CommentOutcome::Created {
                            issue: key.clone(),
                            comment_id,
                        })
                    }
                    Err(e) => {
                        warn!(url = %info.url, title = %info.title, error = %e, "Failed to add comment");
                        Ok(failed(e.to_string()))
                    }
                }
            }
        }
    }
}

/// Runs `future` unless `cancel` fires first.
async fn cancellable<F: Future>(
    cancel: &CancellationToken,
    future: F,
) -> Result<F::Output, UpsertError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(UpsertError::Cancelled),
        output = future => Ok(output),
    }
}
