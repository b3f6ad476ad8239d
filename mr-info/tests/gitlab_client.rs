use chrono::{TimeZone, Utc};
use mr_info::gitlab::MergeRequestState;
use mr_info::{fetch_selected_projects, GitLabClient, GitLabError, GitLabSettings, MergeRequestSource};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GitLabClient {
    let settings = GitLabSettings {
        url: format!("{}/", server.uri()),
        token: "glpat-secret".to_string(),
        ..Default::default()
    };
    GitLabClient::new(&settings).unwrap()
}

fn projects(ids: &[u64]) -> serde_json::Value {
    json!(ids
        .iter()
        .map(|id| json!({
            "id": id,
            "name": format!("service-{id}"),
            "path_with_namespace": format!("group/service-{id}"),
        }))
        .collect::<Vec<_>>())
}

#[tokio::test]
async fn follows_next_page_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .and(header("private-token", "glpat-secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(projects(&[1, 2])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "")
                .set_body_json(projects(&[3])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let selected = fetch_selected_projects(
        &client(&server),
        &["group/service-3".to_string(), "1".to_string()],
        2,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    let ids: Vec<_> = selected.iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 3]);
}

#[tokio::test]
async fn lists_merge_requests_updated_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/merge_requests"))
        .and(query_param("updated_after", "2024-05-01T12:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1001,
            "iid": 1,
            "title": "feat(ABC-123): add login",
            "state": "merged",
            "web_url": "https://gitlab.example.com/group/service/-/merge_requests/1",
            "updated_at": "2024-05-01T13:00:00.000Z",
            "author": { "username": "alice" }
        }])))
        .mount(&server)
        .await;

    let since = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let page = client(&server)
        .merge_requests_page(42, since, 1, 100)
        .await
        .unwrap();

    assert_eq!(page.next, None);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].state, MergeRequestState::Merged);
    assert_eq!(page.items[0].iid, 1);
}

#[tokio::test]
async fn lists_notes_with_authors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/merge_requests/1/notes"))
        .and(query_param("order_by", "created_at"))
        .and(query_param("sort", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "body": ":tada: This MR is included in version 1.0.0 :tada:",
            "author": { "username": "release-bot" },
            "updated_at": "2024-05-01T14:00:00Z",
            "system": false
        }])))
        .mount(&server)
        .await;

    let page = client(&server).notes_page(42, 1, 1, 100).await.unwrap();

    assert_eq!(page.items[0].author.username, "release-bot");
}

#[tokio::test]
async fn reports_api_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "401 Unauthorized"
        })))
        .mount(&server)
        .await;

    let error = client(&server).projects_page(1, 100).await.unwrap_err();

    match error {
        GitLabError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "401 Unauthorized");
        }
        other => panic!("unexpected error: {other}"),
    }
}
