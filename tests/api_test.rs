mod common;

use common::{FakeConfig, FakeUpstream, SearchMode};
use reqwest::StatusCode;
use scrobble_slots::{api::CACHE_CONTROL_VALUE, resolver::Resolver, server};
use serde_json::Value;

/// Serves the real router against a fake upstream and returns its base URL.
async fn start_app(config: FakeConfig) -> (FakeUpstream, String) {
    let upstream = FakeUpstream::start(config).await;
    let app = server::router(Resolver::new(upstream.settings()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (upstream, format!("http://{}", addr))
}

async fn get_json(url: &str) -> (StatusCode, Option<String>, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    let cache = response
        .headers()
        .get(reqwest::header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.json::<Value>().await.unwrap();
    (status, cache, body)
}

#[tokio::test]
async fn test_health_reports_configured_upstreams() {
    let (_upstream, base) = start_app(FakeConfig::default()).await;

    let (status, _, body) = get_json(&format!("{}/health", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["lastfm"], true);
    assert_eq!(body["spotify"], true);
}

#[tokio::test]
async fn test_playcount_endpoint() {
    let (_upstream, base) = start_app(FakeConfig::default()).await;

    let (status, _, body) = get_json(&format!("{}/playcount?user=rj", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["maxPlaycount"], 500);
}

#[tokio::test]
async fn test_playcount_endpoint_errors() {
    let (upstream, base) = start_app(FakeConfig::default()).await;

    let (status, _, body) = get_json(&format!("{}/playcount", base)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("user"));
    assert_eq!(upstream.lastfm_calls(), 0);

    let (status, _, body) = get_json(&format!("{}/playcount?user=ghost", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _, _) = get_json(&format!("{}/playcount?user=flaky", base)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _, _) = get_json(&format!("{}/playcount?user=broken", base)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_track_by_index_endpoint() {
    let (_upstream, base) = start_app(FakeConfig::default()).await;

    let (status, cache, body) = get_json(&format!(
        "{}/track-by-index?user=rj&n=1&maxPlaycount=500",
        base
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some(CACHE_CONTROL_VALUE));
    assert_eq!(body["track"]["name"], common::record_title(3, 99));
    assert_eq!(body["track"]["artist"], common::ARTIST);
    assert_eq!(body["spotify"]["id"], "4uLU6hMCjMI75M1A2tKUQC");
    assert!(body["spotify"]["previewUrl"].is_null());
}

#[tokio::test]
async fn test_track_by_index_without_match_is_still_ok() {
    let (_upstream, base) = start_app(FakeConfig {
        search: SearchMode::Status(502),
        ..FakeConfig::default()
    })
    .await;

    let (status, _, body) = get_json(&format!(
        "{}/track-by-index?user=rj&n=42&maxPlaycount=500",
        base
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["spotify"].is_null());
    assert!(body["track"].is_object());
}

#[tokio::test]
async fn test_track_by_index_validation() {
    let (upstream, base) = start_app(FakeConfig::default()).await;

    for query in [
        "n=1&maxPlaycount=500",
        "user=&n=1&maxPlaycount=500",
        "user=rj&maxPlaycount=500",
        "user=rj&n=0&maxPlaycount=500",
        "user=rj&n=501&maxPlaycount=500",
        "user=rj&n=abc&maxPlaycount=500",
    ] {
        let (status, cache, body) =
            get_json(&format!("{}/track-by-index?{}", base, query)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {}", query);
        assert!(cache.is_none());
        assert!(body["error"].is_string());
    }

    assert_eq!(upstream.lastfm_calls(), 0);
}

#[tokio::test]
async fn test_track_by_index_not_found() {
    let (_upstream, base) = start_app(FakeConfig {
        total_scrobbles: 450,
        ..FakeConfig::default()
    })
    .await;

    let (status, _, body) = get_json(&format!(
        "{}/track-by-index?user=rj&n=1&maxPlaycount=500",
        base
    ))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("index 1"));
}

#[tokio::test]
async fn test_transport_failure_does_not_leak_api_key() {
    let upstream = FakeUpstream::start(FakeConfig::default()).await;

    // grab a free port and release it so nothing is listening there
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_addr = closed.local_addr().unwrap();
    drop(closed);

    let settings = scrobble_slots::config::Settings {
        lastfm_api_url: format!("http://{}/2.0/", closed_addr),
        ..upstream.settings()
    };
    let app = server::router(Resolver::new(settings));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let response = reqwest::get(format!("http://{}/playcount?user=rj", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response.text().await.unwrap();
    assert!(body.contains("error"));
    assert!(!body.contains("lastfm-key"), "body leaked the key: {}", body);
    assert!(!body.contains("api_key"), "body leaked the query: {}", body);
}

#[tokio::test]
async fn test_lastfm_error_inside_ok_body_is_bad_gateway() {
    let (_upstream, base) = start_app(FakeConfig::default()).await;

    let (status, _, body) = get_json(&format!("{}/playcount?user=envelope", base)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Operation failed"));

    let (status, _, _) = get_json(&format!(
        "{}/track-by-index?user=envelope&n=1&maxPlaycount=500",
        base
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
