//! The persisted record of one correlated merge request.

use crate::gitlab::MergeRequestState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A merge request correlated with a Jira issue.
///
/// Every field may be absent in the persisted form; absence means "not known".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequestInfo {
    /// Jira project key extracted from the title (e.g. `ABC`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    /// Jira issue key extracted from the title (e.g. `ABC-123`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub issue: String,

    /// Merge request title.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Merge request state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MergeRequestState>,

    /// Release version announced by the release bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tada_version: Option<String>,

    /// Release link announced by the release bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_url: Option<String>,

    /// Last update of the merge request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_request_update_at: Option<DateTime<Utc>>,

    /// Last update of the note the release was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_update_at: Option<DateTime<Utc>>,

    /// Web URL of the merge request.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}
