//! HttpPortalClient tests against a mock portal

use api_portal::error::FetchError;
use api_portal::shell::{
    ContentPane, DocsShell, HttpPortalClient, InMemoryPreferences, SpecSource, SwaggerUiWidget,
    HOME_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures;

async fn mock_index(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sidebar-data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "title": "Alpha", "description": "First", "version": "1.0.0", "order": 1},
            {"id": "b", "title": "Bravo", "description": "", "version": "1.0.0", "order": 999}
        ])))
        .mount(server)
        .await;
}

async fn mock_spec(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/openapi/{id}.yaml")))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixtures::USERS))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> HttpPortalClient {
    HttpPortalClient::new(reqwest::Client::new(), &server.uri()).unwrap()
}

#[tokio::test]
async fn test_fetch_index() {
    let server = MockServer::start().await;
    mock_index(&server).await;

    let specs = client(&server).fetch_index().await.unwrap();

    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].id, "a");
    assert_eq!(specs[1].title, "Bravo");
}

#[tokio::test]
async fn test_fetch_index_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sidebar-data.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).fetch_index().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_fetch_index_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sidebar-data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_index().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_resolve_existing_spec() {
    let server = MockServer::start().await;
    mock_spec(&server, "a").await;

    let url = client(&server).resolve_spec("a").await.unwrap();
    assert_eq!(url, format!("{}/openapi/a.yaml", server.uri()));
}

#[tokio::test]
async fn test_resolve_missing_spec() {
    let server = MockServer::start().await;

    let err = client(&server).resolve_spec("b").await.unwrap_err();
    assert_eq!(err, FetchError::NotFound("b.yaml".to_string()));
}

#[tokio::test]
async fn test_unreachable_portal_degrades_to_home() {
    // Nothing listens on the discard port
    let client = HttpPortalClient::new(reqwest::Client::new(), "http://127.0.0.1:9").unwrap();
    let shell = DocsShell::load(
        client,
        SwaggerUiWidget::default(),
        InMemoryPreferences::new(),
    )
    .await;

    assert_eq!(shell.nav_entries().len(), 1);
    assert_eq!(shell.active_key(), HOME_KEY);
}

#[tokio::test]
async fn test_shell_over_http() {
    let server = MockServer::start().await;
    mock_index(&server).await;
    mock_spec(&server, "a").await;

    let mut shell = DocsShell::load(
        client(&server),
        SwaggerUiWidget::default(),
        InMemoryPreferences::new(),
    )
    .await;
    assert_eq!(shell.nav_entries().len(), 3);

    shell.select("a").await;
    match shell.content() {
        ContentPane::Rendered { instance, .. } => {
            assert_eq!(instance.url, format!("{}/openapi/a.yaml", server.uri()));
        }
        other => panic!("expected rendered pane, got {other:?}"),
    }

    // No document mounted for "b": error panel, widget never invoked
    shell.select("b").await;
    assert!(matches!(shell.content(), ContentPane::Error { id, .. } if id == "b"));
}
