//! GitLab API resources consumed by the correlation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A GitLab project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
}

/// State of a merge request as reported by GitLab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRequestState {
    Opened,
    Closed,
    Merged,
    Locked,
}

impl MergeRequestState {
    /// Returns the GitLab spelling of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Merged => "merged",
            Self::Locked => "locked",
        }
    }
}

impl fmt::Display for MergeRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merge request of a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub iid: u64,
    pub title: String,
    pub state: MergeRequestState,
    pub web_url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Author of a note.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoteAuthor {
    pub username: String,
}

/// A note (comment or system message) on a merge request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Note {
    pub id: u64,
    pub body: String,
    pub author: NoteAuthor,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_merge_request() {
        let mr: MergeRequest = serde_json::from_str(
            r#"{
                "id": 1001,
                "iid": 7,
                "project_id": 42,
                "title": "fix(ABC-123): correct typo",
                "state": "merged",
                "web_url": "https://gitlab.example.com/group/repo/-/merge_requests/7",
                "updated_at": "2024-03-01T10:15:30.123Z",
                "author": { "username": "dev" }
            }"#,
        )
        .unwrap();

        assert_eq!(mr.iid, 7);
        assert_eq!(mr.state, MergeRequestState::Merged);
        assert_eq!(
            mr.updated_at.unwrap().to_rfc3339(),
            "2024-03-01T10:15:30.123+00:00"
        );
    }

    #[test]
    fn state_uses_gitlab_spelling() {
        assert_eq!(MergeRequestState::Opened.to_string(), "opened");
        assert_eq!(
            serde_json::to_string(&MergeRequestState::Locked).unwrap(),
            "\"locked\""
        );
    }
}
