//! HTTP client for the GitLab REST API v4.

use super::{GitLabError, MergeRequest, MergeRequestSource, Note, Project};
use crate::config::GitLabSettings;
use crate::pagination::Page;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Authenticated GitLab API client.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    client: Client,
    base_url: String,
}

impl GitLabClient {
    /// Builds a client that authenticates with a `PRIVATE-TOKEN` header.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the token is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(settings: &GitLabSettings) -> Result<Self, GitLabError> {
        let mut headers = header::HeaderMap::new();
        let mut token = header::HeaderValue::from_str(&settings.token)
            .map_err(|_| GitLabError::InvalidToken)?;
        token.set_sensitive(true);
        headers.insert("private-token", token);

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
        format!("{}/api/v4{}", self.base_url, path)
    }

    /// Requests one page of a list endpoint.
    async fn get_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>, GitLabError> {
        debug!(endpoint, ?query, "GET");
        let response = self
            .client
            .get(self.api_url(endpoint))
            .query(query)
            .send()
            .await?;

        let next = next_page(&response);
        let items = handle_response::<Vec<T>>(response, endpoint).await?;
        Ok(Page::new(items, next))
    }
}

/// Reads the `X-Next-Page` header; empty or missing means last page.
fn next_page(response: &Response) -> Option<u32> {
    response
        .headers()
        .get("x-next-page")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

async fn handle_response<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
) -> Result<T, GitLabError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    // GitLab reports errors as {"message": ...} or {"error": ...}
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_string))
        })
        .unwrap_or(body);

    Err(GitLabError::Api {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
        message,
    })
}

fn paging(page: u32, per_page: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("per_page", per_page.to_string())]
}

#[async_trait]
impl MergeRequestSource for GitLabClient {
    async fn projects_page(&self, page: u32, per_page: u32) -> Result<Page<Project>, GitLabError> {
        self.get_page("/projects", &paging(page, per_page)).await
    }

    async fn merge_requests_page(
        &self,
        project_id: u64,
        updated_after: DateTime<Utc>,
        page: u32,
        per_page: u32,
    ) -> Result<Page<MergeRequest>, GitLabError> {
        let endpoint = format!("/projects/{project_id}/merge_requests");
        let [page, per_page] = paging(page, per_page);
        let query = [
            page,
            per_page,
            (
                "updated_after",
                updated_after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        ];
        self.get_page(&endpoint, &query).await
    }

    async fn notes_page(
        &self,
        project_id: u64,
        merge_request_iid: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Note>, GitLabError> {
        let endpoint = format!("/projects/{project_id}/merge_requests/{merge_request_iid}/notes");
        // GitLab lists notes newest first unless told otherwise.
        let [page, per_page] = paging(page, per_page);
        let query = [
            page,
            per_page,
            ("order_by", "created_at".to_string()),
            ("sort", "asc".to_string()),
        ];
        self.get_page(&endpoint, &query).await
    }
}
