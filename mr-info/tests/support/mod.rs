//! In-memory GitLab and Jira doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mr_info::gitlab::{MergeRequest, MergeRequestState, Note, NoteAuthor, Project};
use mr_info::jira::{Comment, TrackedIssue};
use mr_info::pagination::Page;
use mr_info::{GitLabError, IssueTracker, JiraError, MergeRequestSource};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
}

pub fn project(id: u64, path: &str) -> Project {
    Project {
        id,
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path_with_namespace: path.to_string(),
    }
}

pub fn merge_request(iid: u64, title: &str, state: MergeRequestState) -> MergeRequest {
    MergeRequest {
        id: 1000 + iid,
        iid,
        title: title.to_string(),
        state,
        web_url: format!("https://gitlab.example.com/group/service/-/merge_requests/{iid}"),
        updated_at: Some(at(10)),
    }
}

pub fn note(id: u64, author: &str, body: &str) -> Note {
    Note {
        id,
        body: body.to_string(),
        author: NoteAuthor {
            username: author.to_string(),
        },
        updated_at: Some(at(11)),
    }
}

fn page_of<T: Clone>(items: &[T], page: u32, per_page: u32) -> Page<T> {
    let per_page = per_page.max(1) as usize;
    let start = (page.saturating_sub(1) as usize) * per_page;
    let chunk: Vec<T> = items.iter().skip(start).take(per_page).cloned().collect();
    let next = (start + per_page < items.len()).then_some(page + 1);
    Page::new(chunk, next)
}

/// GitLab double serving fixed listings, paged like the real API.
#[derive(Default)]
pub struct FakeSource {
    pub projects: Vec<Project>,
    pub merge_requests: HashMap<u64, Vec<MergeRequest>>,
    pub notes: HashMap<(u64, u64), Vec<Note>>,
    pub fail_notes_for: Option<(u64, u64)>,
    pub requested_updated_after: Mutex<Vec<DateTime<Utc>>>,
    pub page_requests: Mutex<usize>,
}

impl FakeSource {
    pub fn with_project(mut self, project: Project, merge_requests: Vec<MergeRequest>) -> Self {
        self.merge_requests.insert(project.id, merge_requests);
        self.projects.push(project);
        self
    }

    pub fn with_notes(mut self, project_id: u64, iid: u64, notes: Vec<Note>) -> Self {
        self.notes.insert((project_id, iid), notes);
        self
    }

    fn count_request(&self) {
        *self.page_requests.lock().unwrap() += 1;
    }
}

#[async_trait]
impl MergeRequestSource for FakeSource {
    async fn projects_page(&self, page: u32, per_page: u32) -> Result<Page<Project>, GitLabError> {
        self.count_request();
        Ok(page_of(&self.projects, page, per_page))
    }

    async fn merge_requests_page(
        &self,
        project_id: u64,
        updated_after: DateTime<Utc>,
        page: u32,
        per_page: u32,
    ) -> Result<Page<MergeRequest>, GitLabError> {
        self.count_request();
        self.requested_updated_after
            .lock()
            .unwrap()
            .push(updated_after);
        let items = self
            .merge_requests
            .get(&project_id)
            .cloned()
            .unwrap_or_default();
        Ok(page_of(&items, page, per_page))
    }

    async fn notes_page(
        &self,
        project_id: u64,
        merge_request_iid: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Note>, GitLabError> {
        self.count_request();
        if self.fail_notes_for == Some((project_id, merge_request_iid)) {
            return Err(GitLabError::Api {
                status: 500,
                endpoint: format!("/projects/{project_id}/merge_requests/{merge_request_iid}/notes"),
                message: "boom".to_string(),
            });
        }
        let items = self
            .notes
            .get(&(project_id, merge_request_iid))
            .cloned()
            .unwrap_or_default();
        Ok(page_of(&items, page, per_page))
    }
}

/// Jira double keeping comments in memory.
#[derive(Default)]
pub struct FakeTracker {
    pub issues: Mutex<BTreeMap<String, Vec<Comment>>>,
    pub failing_issues: HashSet<String>,
    pub failing_adds: HashSet<String>,
    pub adds: Mutex<usize>,
    pub updates: Mutex<usize>,
    next_id: Mutex<u64>,
}

impl FakeTracker {
    pub fn with_issue(self, key: &str, comments: Vec<Comment>) -> Self {
        self.issues.lock().unwrap().insert(key.to_string(), comments);
        self
    }

    pub fn failing_issue(mut self, key: &str) -> Self {
        self.issues.lock().unwrap().insert(key.to_string(), Vec::new());
        self.failing_issues.insert(key.to_string());
        self
    }

    pub fn failing_add(mut self, key: &str) -> Self {
        self.failing_adds.insert(key.to_string());
        self
    }

    pub fn comments(&self, key: &str) -> Vec<Comment> {
        self.issues
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        *self.adds.lock().unwrap() + *self.updates.lock().unwrap()
    }
}

pub fn comment(id: &str, body: &str) -> Comment {
    Comment {
        id: id.to_string(),
        body: body.to_string(),
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn issue(&self, key: &str) -> Result<Option<TrackedIssue>, JiraError> {
        if self.failing_issues.contains(key) {
            return Err(JiraError::Api {
                status: 500,
                endpoint: format!("/issue/{key}"),
                message: "unavailable".to_string(),
            });
        }
        Ok(self
            .issues
            .lock()
            .unwrap()
            .get(key)
            .map(|comments| TrackedIssue {
                key: key.to_string(),
                comments: comments.clone(),
            }))
    }

    async fn add_comment(&self, issue_key: &str, body: &str) -> Result<Comment, JiraError> {
        if self.failing_adds.contains(issue_key) {
            return Err(JiraError::Api {
                status: 400,
                endpoint: format!("/issue/{issue_key}/comment"),
                message: "rejected".to_string(),
            });
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("c{}", *next)
        };
        let created = comment(&id, body);
        self.issues
            .lock()
            .unwrap()
            .entry(issue_key.to_string())
            .or_default()
            .push(created.clone());
        *self.adds.lock().unwrap() += 1;
        Ok(created)
    }

    async fn update_comment(
        &self,
        issue_key: &str,
        comment_id: &str,
        body: &str,
    ) -> Result<Comment, JiraError> {
        let mut issues = self.issues.lock().unwrap();
        let existing = issues
            .get_mut(issue_key)
            .and_then(|comments| comments.iter_mut().find(|c| c.id == comment_id))
            .ok_or_else(|| JiraError::Api {
                status: 404,
                endpoint: format!("/issue/{issue_key}/comment/{comment_id}"),
                message: "no such comment".to_string(),
            })?;
        existing.body = body.to_string();
        *self.updates.lock().unwrap() += 1;
        Ok(existing.clone())
    }
}
