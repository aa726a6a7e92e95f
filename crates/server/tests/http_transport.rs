//! HTTP transport tests against the in-process router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use boardpress_server::app::ArticleService;
use boardpress_server::http_transport::router;
use boardpress_store::FileStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn service() -> (TempDir, axum::Router) {
    let temp = tempdir().unwrap();
    let store = Arc::new(FileStore::new(temp.path()));
    let app = router(Arc::new(ArticleService::new(store)));
    (temp, app)
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn post_mcp(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_service_name() {
    let (_temp, app) = service();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "service": "boardpress"}));
}

#[tokio::test]
async fn root_also_serves_health() {
    let (_temp, app) = service();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn tools_list_returns_catalog() {
    let (_temp, app) = service();
    let (status, body) = send(app, post_mcp(json!({"method": "tools/list"}))).await;
    assert_eq!(status, StatusCode::OK);
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 9);
    assert_eq!(tools[0]["name"], "list_articles");
}

#[tokio::test]
async fn tools_call_runs_the_dispatcher() {
    let (_temp, app) = service();

    let (status, body) = send(
        app.clone(),
        post_mcp(json!({
            "method": "tools/call",
            "params": {
                "name": "create_article",
                "arguments": {
                    "title": "My First Post",
                    "content": "Hello",
                    "category": "General",
                    "excerpt": "intro"
                }
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isError"], false);

    let (status, body) = send(
        app,
        post_mcp(json!({
            "method": "tools/call",
            "params": { "name": "list_articles" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let text = body["content"][0]["text"].as_str().unwrap();
    let listed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(listed[0]["slug"], "my-first-post");
}

#[tokio::test]
async fn tool_level_failures_stay_in_the_envelope() {
    let (_temp, app) = service();
    let (status, body) = send(
        app,
        post_mcp(json!({
            "method": "tools/call",
            "params": { "name": "get_article", "arguments": {"slug": "ghost"} }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isError"], true);
}

#[tokio::test]
async fn unknown_method_maps_to_500() {
    let (_temp, app) = service();
    let (status, body) = send(app, post_mcp(json!({"method": "bogus"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "unknown method: bogus");
}

#[tokio::test]
async fn call_without_tool_name_maps_to_500() {
    let (_temp, app) = service();
    let (status, body) = send(app, post_mcp(json!({"method": "tools/call"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("params.name"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (_temp, app) = service();
    let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let (_temp, app) = service();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/mcp")
        .header(header::ORIGIN, "https://example.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
