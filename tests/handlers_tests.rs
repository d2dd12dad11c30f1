//! Handler and fetch integration tests
//!
//! Drives the `/fetch-url` endpoint end to end against a mock upstream
//! server: URL validation, upstream failures, the fetch timeout, and the
//! success path.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sourcefetch::handlers::{extract_router, AppState};
use sourcefetch::pipeline::{Extractor, ExtractorConfig};

// ============================================================================
// Test Utilities
// ============================================================================

fn app_with_config(config: ExtractorConfig) -> Router {
    let extractor = Extractor::new(config).expect("extractor");
    extract_router(Arc::new(AppState::new(extractor)))
}

fn app() -> Router {
    app_with_config(ExtractorConfig::default())
}

async fn post_fetch_url(app: Router, url: &str) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "url": url }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/fetch-url")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ============================================================================
// URL Validation
// ============================================================================

#[tokio::test]
async fn invalid_url_returns_400() {
    let (status, body) = post_fetch_url(app(), "not a url").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Invalid URL"), "got: {message}");
}

#[tokio::test]
async fn empty_url_returns_400() {
    let (status, body) = post_fetch_url(app(), "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("URL is required"));
}

#[tokio::test]
async fn non_http_scheme_returns_400() {
    let (status, body) = post_fetch_url(app(), "ftp://example.com/file").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid URL"));
}

// ============================================================================
// Upstream Failures
// ============================================================================

#[tokio::test]
async fn upstream_404_returns_400_with_status_and_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let (status, body) = post_fetch_url(app(), &url).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("404"), "got: {message}");
    assert!(message.contains("Not Found"), "got: {message}");
}

#[tokio::test]
async fn upstream_500_returns_400() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = post_fetch_url(app(), &server.uri()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ExtractorConfig {
        fetch_timeout: Duration::from_millis(250),
        ..Default::default()
    };
    let (status, body) = post_fetch_url(app_with_config(config), &server.uri()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("timed out"), "got: {message}");
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn fetches_and_extracts_a_page() {
    let page = format!(
        r#"<html>
            <head>
                <title>Example Page</title>
                <meta name="description" content="A test page">
            </head>
            <body>
                <main><h1>Welcome</h1><p>{}</p></main>
            </body>
        </html>"#,
        "body content ".repeat(30)
    );

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/article", server.uri());
    let (status, body) = post_fetch_url(app(), &url).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Example Page");
    assert_eq!(body["description"], "A test page");
    assert_eq!(body["url"], url);

    let content = body["content"].as_str().unwrap();
    assert!(content.starts_with("# Example Page"));
    assert!(content.contains("## Main Content"));
    assert!(content.contains("# Welcome"));
    assert!(content.contains("body content"));
}

#[tokio::test]
async fn extractor_sends_browser_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(wiremock::matchers::header_exists("user-agent"))
        .and(wiremock::matchers::header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = post_fetch_url(app(), &server.uri()).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "sourcefetch");
}
