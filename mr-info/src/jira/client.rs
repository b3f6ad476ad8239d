//! HTTP client for the Jira REST API v2.

use super::models::{CommentBody, CommentPage, IssueResponse};
use super::{Comment, IssueTracker, JiraError, TrackedIssue};
use crate::config::JiraSettings;
use crate::pagination::{fetch_all_pages, Page};
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Comments requested per page when an issue has more than Jira returns inline.
const COMMENTS_PER_PAGE: u32 = 100;

/// Jira client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct JiraClient {
    client: Client,
    base_url: String,
}

impl JiraClient {
    /// Builds a client sending `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the token is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(settings: &JiraSettings) -> Result<Self, JiraError> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", settings.token))
            .map_err(|_| JiraError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/2{}", self.base_url, path)
    }

    async fn comments_page(&self, key: &str, start_at: u32) -> Result<Page<Comment>, JiraError> {
        let endpoint = format!("/issue/{key}/comment");
        let response = self
            .client
            .get(self.api_url(&endpoint))
            .query(&[("startAt", start_at), ("maxResults", COMMENTS_PER_PAGE)])
            .send()
            .await?;
        let page: CommentPage = handle_response(response, &endpoint).await?;
        let next = page.next_start();
        Ok(Page::new(page.comments, next))
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
) -> Result<T, JiraError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    // Jira reports errors as {"errorMessages": [...], "errors": {...}}
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("errorMessages")
                .and_then(|m| m.as_array())
                .filter(|m| !m.is_empty())
                .map(|m| {
                    m.iter()
                        .filter_map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                })
        })
        .unwrap_or(body);

    Err(JiraError::Api {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
        message,
    })
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn issue(&self, key: &str) -> Result<Option<TrackedIssue>, JiraError> {
        let endpoint = format!("/issue/{key}");
        debug!(issue = key, "Fetching issue");
        let response = self
            .client
            .get(self.api_url(&endpoint))
            .query(&[("fields", "comment")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let issue: IssueResponse = handle_response(response, &endpoint).await?;
        let Some(inline) = issue.fields.comment else {
            return Ok(Some(TrackedIssue {
                key: issue.key,
                comments: Vec::new(),
            }));
        };

        let next = inline.next_start();
        let total = inline.total;
        let mut comments = inline.comments;
        if let Some(start) = next {
            debug!(
                issue = key,
                inline = comments.len(),
                total,
                "Fetching remaining comments"
            );
            // Cancellation is applied by the caller around the whole lookup.
            let rest = fetch_all_pages("comments", start, &CancellationToken::new(), |start| {
                self.comments_page(key, start)
            })
            .await?;
            comments.extend(rest);
        }

        Ok(Some(TrackedIssue {
            key: issue.key,
            comments,
        }))
    }

    async fn add_comment(&self, issue_key: &str, body: &str) -> Result<Comment, JiraError> {
        let endpoint = format!("/issue/{issue_key}/comment");
        let response = self
            .client
            .post(self.api_url(&endpoint))
            .json(&CommentBody { body })
            .send()
            .await?;
        handle_response(response, &endpoint).await
    }

    async fn update_comment(
        &self,
        issue_key: &str,
        comment_id: &str,
        body: &str,
    ) -> Result<Comment, JiraError> {
        let endpoint = format!("/issue/{issue_key}/comment/{comment_id}");
        let response = self
            .client
            .put(self.api_url(&endpoint))
            .json(&CommentBody { body })
            .send()
            .await?;
        handle_response(response, &endpoint).await
    }
}
