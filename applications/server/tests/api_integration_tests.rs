/// API integration tests
/// Tests complete HTTP request/response cycles against a mock oEmbed provider
mod common;

use axum::http::StatusCode;
use common::{app_for, fixtures, get, json_body};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider_with_video() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param(
            "url",
            format!("https://www.youtube.com/watch?v={}", fixtures::VIDEO_ID),
        ))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": fixtures::TITLE,
            "author_name": fixtures::AUTHOR,
        })))
        .mount(&server)
        .await;
    server
}

/// Test GET /api/health
#[tokio::test]
async fn test_health() {
    let provider = MockServer::start().await;

    let response = get(app_for(&provider), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// Test successful info lookup
#[tokio::test]
async fn test_video_info() {
    let provider = provider_with_video().await;

    let response = get(
        app_for(&provider),
        &format!("/api/youtube/info?id={}", fixtures::VIDEO_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "videoId": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "author": "Rick Astley",
            "thumbnail": "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
            "embedUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ?enablejsapi=1",
            "streamUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        })
    );
}

/// Test missing id parameter
#[tokio::test]
async fn test_video_info_missing_id() {
    let provider = MockServer::start().await;

    for uri in ["/api/youtube/info", "/api/youtube/info?id=", "/api/youtube/info?id=%20"] {
        let response = get(app_for(&provider), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Video ID is required" })
        );
    }
}

/// Test provider failure
#[tokio::test]
async fn test_video_info_provider_failure() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&provider)
        .await;

    let response = get(
        app_for(&provider),
        &format!("/api/youtube/info?id={}", fixtures::VIDEO_ID),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Failed to fetch video information" })
    );
}

/// Test malformed id never reaches the provider
#[tokio::test]
async fn test_video_info_malformed_id() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&provider)
        .await;

    let response = get(app_for(&provider), "/api/youtube/info?id=short").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Failed to fetch video information" })
    );
}

/// Test unknown routes
#[tokio::test]
async fn test_unknown_route() {
    let provider = MockServer::start().await;

    let response = get(app_for(&provider), "/api/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
