//! Jira REST resources used by the comment upsert engine.

use serde::{Deserialize, Serialize};

/// A Jira comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub body: String,
}

/// An issue together with every comment on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIssue {
    pub key: String,
    pub comments: Vec<Comment>,
}

/// Response of `GET /issue/{key}?fields=comment`.
#[derive(Debug, Deserialize)]
pub(crate) struct IssueResponse {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueFields {
    pub comment: Option<CommentPage>,
}

/// A page of comments, both inline in an issue and from the comment endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentPage {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl CommentPage {
    /// Offset of the first comment not included in this page, if any remain.
    pub fn next_start(&self) -> Option<u32> {
        let seen = self.start_at + self.comments.len() as u32;
        (!self.comments.is_empty() && seen < self.total).then_some(seen)
    }
}

/// Request body for creating or replacing a comment.
#[derive(Debug, Serialize)]
pub(crate) struct CommentBody<'a> {
    pub body: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_issue_with_comments() {
        let issue: IssueResponse = serde_json::from_str(
            r#"{
                "id": "10001",
                "key": "ABC-123",
                "fields": {
                    "comment": {
                        "startAt": 0,
                        "maxResults": 2,
                        "total": 3,
                        "comments": [
                            { "id": "1", "body": "first", "author": { "name": "x" } },
                            { "id": "2", "body": "second" }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let page = issue.fields.comment.unwrap();
        assert_eq!(issue.key, "ABC-123");
        assert_eq!(page.comments.len(), 2);
        assert_eq!(page.next_start(), Some(2));
    }

    #[test]
    fn complete_page_has_no_next_start() {
        let page = CommentPage {
            start_at: 2,
            total: 3,
            comments: vec![Comment {
                id: "3".to_string(),
                body: String::new(),
            }],
        };
        assert_eq!(page.next_start(), None);
    }

    #[test]
    fn empty_page_stops_paging() {
        let page = CommentPage {
            start_at: 0,
            total: 10,
            comments: Vec::new(),
        };
        assert_eq!(page.next_start(), None);
    }
}
