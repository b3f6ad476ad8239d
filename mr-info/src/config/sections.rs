//! Settings sections and their defaults.

use crate::pagination::DEFAULT_PER_PAGE;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default title pattern: `<type>(<ISSUE>): <subject>`.
pub const DEFAULT_TITLE_REGEX: &str = r"[a-zA-Z]+\((?P<Issue>(?P<Project>[A-Z]+)-[0-9]+)\):.*";

/// Default pattern of the release bot's announcement.
pub const DEFAULT_VERSION_REGEX: &str =
    r":tada: This MR is included in version (?P<Version>[0-9]+\.[0-9]+\.[0-9]+) :tada:";

/// Default pattern of the release link in the bot's announcement.
pub const DEFAULT_VERSION_URL_REGEX: &str =
    r"The release is available on \[GitLab release\]\((?P<VersionUrl>[^)]+)\).";

/// Default look-back window for merge request updates.
pub const DEFAULT_UPDATED_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default snapshot path.
pub fn default_io_file() -> PathBuf {
    PathBuf::from("mr-info.yaml")
}

/// GitLab connection and project selection.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GitLabSettings {
    /// Base URL of the GitLab instance.
    pub url: String,

    /// Personal access token.
    pub token: String,

    /// Project allow-list: numeric ids or `namespace/path` strings.
    pub projects: Vec<String>,

    /// Items per page for list requests (clamped to 1..=100).
    pub per_page: u32,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Merge request scanning.
    pub merge_requests: MergeRequestSettings,
}

impl GitLabSettings {
    /// Page size to request, within GitLab's accepted range.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.per_page.clamp(1, 100)
    }
}

impl Default for GitLabSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            projects: Vec::new(),
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            merge_requests: MergeRequestSettings::default(),
        }
    }
}

impl fmt::Debug for GitLabSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabSettings")
            .field("url", &self.url)
            .field("projects", &self.projects)
            .field("per_page", &self.per_page)
            .field("timeout_secs", &self.timeout_secs)
            .field("merge_requests", &self.merge_requests)
            .finish_non_exhaustive()
    }
}

/// Patterns and filters applied to merge requests and their notes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MergeRequestSettings {
    /// Only merge requests updated within this window are scanned.
    #[serde(deserialize_with = "super::duration::deserialize")]
    pub updated_duration: Duration,

    /// Title pattern with `Issue` and `Project` groups.
    pub title_regex: String,

    /// Release announcement pattern with a `Version` group.
    pub version_regex: String,

    /// Release link pattern with a `VersionUrl` group.
    pub version_url_regex: String,

    /// Usernames whose notes may carry release announcements.
    pub release_bot_usernames: Vec<String>,
}

impl Default for MergeRequestSettings {
    fn default() -> Self {
        Self {
            updated_duration: DEFAULT_UPDATED_DURATION,
            title_regex: DEFAULT_TITLE_REGEX.to_string(),
            version_regex: DEFAULT_VERSION_REGEX.to_string(),
            version_url_regex: DEFAULT_VERSION_URL_REGEX.to_string(),
            release_bot_usernames: Vec::new(),
        }
    }
}

/// Jira connection and correlation targets.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct JiraSettings {
    /// Base URL of the Jira instance.
    pub url: String,

    /// Bearer token.
    pub token: String,

    /// Jira project keys that merge requests may be correlated with.
    pub targets: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Handlebars template replacing the built-in comment body.
    pub comment_template: Option<String>,
}

impl Default for JiraSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            targets: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            comment_template: None,
        }
    }
}

impl fmt::Debug for JiraSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraSettings")
            .field("url", &self.url)
            .field("targets", &self.targets)
            .field("timeout_secs", &self.timeout_secs)
            .field("comment_template", &self.comment_template)
            .finish_non_exhaustive()
    }
}
