//! Correlation of GitLab merge requests with Jira issues.
//!
//! For every selected project the [`Correlator`] lists recently updated merge
//! requests, keeps those whose title references a targeted Jira project, reads
//! release announcements from their notes and files the result in a
//! [`CorrelationMap`].

mod error;
mod release;
mod selection;
mod title;

pub use error::CorrelationError;
pub use release::{ReleaseInfo, ReleaseNoteExtractor};
pub use selection::select_projects;
pub use title::{IssueReference, TargetProjects, TitleCorrelator};

use crate::config::Settings;
use crate::gitlab::{MergeRequest, MergeRequestSource, Project};
use crate::pagination::fetch_all_pages;
use crate::snapshot::{CorrelationMap, MergeRequestInfo};
use crate::summary::RunSummary;
use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};

/// Compiles `pattern` and checks that it defines every group in `groups`.
pub(crate) fn compile_pattern(
    name: &'static str,
    pattern: &str,
    groups: &[&'static str],
) -> Result<Regex, CorrelationError> {
    let regex = Regex::new(pattern).map_err(|source| CorrelationError::InvalidPattern {
        name,
        pattern: pattern.to_string(),
        source,
    })?;

    for group in groups {
        if !regex.capture_names().flatten().any(|n| n == *group) {
            return Err(CorrelationError::MissingCaptureGroup {
                name,
                pattern: pattern.to_string(),
                group,
            });
        }
    }
    Ok(regex)
}

/// Lists every project and keeps those named by `selectors`.
///
/// # Errors
///
/// Returns [`CorrelationError::Pagination`] if listing fails and
/// [`CorrelationError::NoProjectsSelected`] if nothing matches.
pub async fn fetch_selected_projects<S>(
    source: &S,
    selectors: &[String],
    per_page: u32,
    cancel: &CancellationToken,
) -> Result<Vec<Project>, CorrelationError>
where
    S: MergeRequestSource + ?Sized,
{
    let projects = fetch_all_pages("projects", 1, cancel, |page| {
        source.projects_page(page, per_page)
    })
    .await?;
    debug!(count = projects.len(), "Listed projects");

    let selected = select_projects(projects, selectors);
    if selected.is_empty() {
        return Err(CorrelationError::NoProjectsSelected {
            selectors: selectors.to_vec(),
        });
    }

    info!(count = selected.len(), "Selected projects");
    Ok(selected)
}

/// Builds the issue to merge request map for a set of projects.
#[derive(Debug, Clone)]
pub struct Correlator {
    titles: TitleCorrelator,
    targets: TargetProjects,
    releases: ReleaseNoteExtractor,
    updated_within: Duration,
    per_page: u32,
}

impl Correlator {
    /// Creates a correlator from its parts.
    pub fn new(
        titles: TitleCorrelator,
        targets: TargetProjects,
        releases: ReleaseNoteExtractor,
        updated_within: Duration,
        per_page: u32,
    ) -> Self {
        Self {
            titles,
            targets,
            releases,
            updated_within,
            per_page,
        }
    }

    /// Compiles the configured patterns and target list.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationError`] if any pattern is invalid.
    pub fn from_settings(settings: &Settings) -> Result<Self, CorrelationError> {
        let mr = &settings.gitlab.merge_requests;
        Ok(Self::new(
            TitleCorrelator::new(&mr.title_regex)?,
            TargetProjects::new(settings.jira.targets.iter().cloned()),
            ReleaseNoteExtractor::new(
                &mr.release_bot_usernames,
                &mr.version_regex,
                &mr.version_url_regex,
            )?,
            mr.updated_duration,
            settings.gitlab.page_size(),
        ))
    }

    /// Lower bound for merge request updates, relative to `now`.
    #[must_use]
    pub fn updated_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::from_std(self.updated_within)
            .ok()
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Correlates the merge requests of `projects`, in order.
    ///
    /// # Errors
    ///
    /// Any listing failure aborts the whole build; no partial map is returned.
    pub async fn build_map<S>(
        &self,
        source: &S,
        projects: &[Project],
        now: DateTime<Utc>,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> Result<CorrelationMap, CorrelationError>
    where
        S: MergeRequestSource + ?Sized,
    {
        let updated_after = self.updated_after(now);
        let mut map = CorrelationMap::new();
        summary.projects_selected += projects.len();

        for project in projects {
            let span = info_span!(
                "project",
                id = project.id,
                path = %project.path_with_namespace
            );
            self.correlate_project(source, project, updated_after, cancel, &mut map, summary)
                .instrument(span)
                .await?;
        }

        Ok(map)
    }

    async fn correlate_project<S>(
        &self,
        source: &S,
        project: &Project,
        updated_after: DateTime<Utc>,
        cancel: &CancellationToken,
        map: &mut CorrelationMap,
        summary: &mut RunSummary,
    ) -> Result<(), CorrelationError>
    where
        S: MergeRequestSource + ?Sized,
    {
        info!(name = %project.name, "Scanning project");
        let per_page = self.per_page;
        let merge_requests = fetch_all_pages("merge requests", 1, cancel, |page| {
            source.merge_requests_page(project.id, updated_after, page, per_page)
        })
        .await?;
        summary.merge_requests_scanned += merge_requests.len();

        for merge_request in &merge_requests {
            let Some(reference) = self.titles.correlate(&merge_request.title) else {
                debug!(title = %merge_request.title, "Merge request does not match");
                summary.merge_requests_unmatched += 1;
                continue;
            };

            if !self.targets.contains(&reference.project) {
                info!(
                    project = %reference.project,
                    issue = %reference.issue,
                    "Ignoring merge request for untargeted project"
                );
                summary.merge_requests_ignored += 1;
                continue;
            }

            info!(
                iid = merge_request.iid,
                issue = %reference.issue,
                state = %merge_request.state,
                title = %merge_request.title,
                "Matched merge request"
            );

            let notes = fetch_all_pages("notes", 1, cancel, |page| {
                source.notes_page(project.id, merge_request.iid, page, per_page)
            })
            .await?;
            let release = self.releases.extract(&notes);
            summary.record_release(&release);

            map.push(merge_request_info(merge_request, reference, release));
            summary.merge_requests_correlated += 1;
        }

        Ok(())
    }
}

fn merge_request_info(
    merge_request: &MergeRequest,
    reference: IssueReference,
    release: ReleaseInfo,
) -> MergeRequestInfo {
    MergeRequestInfo {
        project: reference.project,
        issue: reference.issue,
        title: merge_request.title.clone(),
        state: Some(merge_request.state),
        tada_version: release.version,
        version_url: release.url,
        merge_request_update_at: merge_request.updated_at,
        note_update_at: release.noted_at,
        url: merge_request.web_url.clone(),
    }
}
