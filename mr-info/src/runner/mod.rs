//! Orchestrates fetch, push and connected runs.

mod error;
mod mode;

pub use error::RunnerError;
pub use mode::Mode;

use crate::comments::CommentUpserter;
use crate::config::Settings;
use crate::correlation::{fetch_selected_projects, Correlator};
use crate::gitlab::{GitLabClient, MergeRequestSource};
use crate::jira::{IssueTracker, JiraClient};
use crate::snapshot::{self, CorrelationMap};
use crate::summary::RunSummary;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Runs one pass of the tool against configured GitLab and Jira instances.
pub struct Runner {
    settings: Settings,
    dry_run: bool,
}

impl Runner {
    /// Creates a runner; `dry_run` suppresses all Jira writes.
    pub fn new(settings: Settings, dry_run: bool) -> Self {
        Self { settings, dry_run }
    }

    /// Executes `mode` with real GitLab and Jira clients.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] for every fatal condition; per-item failures are
    /// reported in the returned [`RunSummary`] instead.
    pub async fn run(
        &self,
        mode: Mode,
        cancel: &CancellationToken,
    ) -> Result<RunSummary, RunnerError> {
        self.settings.validate_for(mode)?;
        info!(%mode, dry_run = self.dry_run, "Starting run");

        let gitlab = if mode.fetches() {
            Some(GitLabClient::new(&self.settings.gitlab)?)
        } else {
            None
        };
        let jira = if mode.pushes() {
            Some(JiraClient::new(&self.settings.jira)?)
        } else {
            None
        };

        self.run_with(mode, gitlab.as_ref(), jira.as_ref(), Utc::now(), cancel)
            .await
    }

    /// Executes `mode` against the given source and tracker.
    ///
    /// `source` must be present when `mode` fetches and `tracker` when it
    /// pushes; a missing collaborator is reported as a missing setting.
    ///
    /// # Errors
    ///
    /// See [`Runner::run`].
    pub async fn run_with<S, T>(
        &self,
        mode: Mode,
        source: Option<&S>,
        tracker: Option<&T>,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<RunSummary, RunnerError>
    where
        S: MergeRequestSource + ?Sized,
        T: IssueTracker + ?Sized,
    {
        let mut summary = RunSummary::new(self.dry_run);

        let map = if mode.fetches() {
            let source = source.ok_or_else(|| missing("gitlab.url"))?;
            self.fetch(source, now, cancel, &mut summary).await?
        } else {
            snapshot::read(&self.settings.io_file)?
        };

        if mode.writes_snapshot() {
            snapshot::write(&self.settings.io_file, &map)?;
        }

        if mode.pushes() {
            let tracker = tracker.ok_or_else(|| missing("jira.url"))?;
            let upserter = CommentUpserter::from_settings(&self.settings.jira, self.dry_run)?;
            info!(
                issues = map.len(),
                merge_requests = map.merge_request_count(),
                "Updating Jira comments"
            );
            upserter
                .upsert_all(tracker, &map, cancel, &mut summary)
                .await?;
        }

        Ok(summary)
    }

    async fn fetch<S>(
        &self,
        source: &S,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> Result<CorrelationMap, RunnerError>
    where
        S: MergeRequestSource + ?Sized,
    {
        let correlator = Correlator::from_settings(&self.settings)?;
        let projects = fetch_selected_projects(
            source,
            &self.settings.gitlab.projects,
            self.settings.gitlab.page_size(),
            cancel,
        )
        .await?;

        let map = correlator
            .build_map(source, &projects, now, cancel, summary)
            .await?;
        info!(
            issues = map.len(),
            merge_requests = map.merge_request_count(),
            "Correlation complete"
        );
        Ok(map)
    }
}

fn missing(key: &str) -> RunnerError {
    RunnerError::Config(crate::config::ConfigError::MissingSetting {
        key: key.to_string(),
    })
}
