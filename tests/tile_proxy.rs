//! Router-level tests for the map tile proxy.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use city_gateway::config::GatewayConfig;

mod common;
use common::{read_body, test_router, MockUpstream};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.tile_servers = vec![
        "https://a.tiles.example".into(),
        "https://b.tiles.example".into(),
        "https://c.tiles.example".into(),
    ];
    config.upstream.tile_user_agent = "city-gateway-test".into();
    config
}

#[tokio::test]
async fn missing_coordinates_are_rejected_before_any_fetch() {
    let upstream = MockUpstream::responding(200, Some("image/png"), PNG_MAGIC);
    let router = test_router(config(), upstream.clone());

    let uris = [
        "/api/tiles",
        "/api/tiles?z=12",
        "/api/tiles?z=12&x=2048",
        "/api/tiles?x=2048&y=1361",
    ];
    for uri in uris {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert!(body["error"].is_string());
    }

    // No outbound fetch was performed for any rejected request.
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn relays_png_with_cache_and_cors_headers() {
    let upstream = MockUpstream::responding(200, Some("image/png"), PNG_MAGIC);
    let router = test_router(config(), upstream.clone());

    let request = Request::builder()
        .uri("/api/tiles?z=12&x=2048&y=1361")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=86400"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    let body = read_body(response).await;
    assert_eq!(&body[..], PNG_MAGIC);

    // (2048 + 1361) % 3 == 1 → second host.
    let sent = upstream.recorded_requests();
    assert_eq!(sent[0].url, "https://b.tiles.example/12/2048/1361.png");
    assert_eq!(sent[0].user_agent.as_deref(), Some("city-gateway-test"));
}

#[tokio::test]
async fn host_selection_is_deterministic_across_requests() {
    let upstream = MockUpstream::responding(200, Some("image/png"), PNG_MAGIC);
    let router = test_router(config(), upstream.clone());

    for _ in 0..3 {
        let request = Request::builder()
            .uri("/api/tiles?z=14&x=8190&y=5447")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let urls: Vec<String> = upstream
        .recorded_requests()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(urls.len(), 3);
    assert!(urls.iter().all(|u| u == &urls[0]));
}

#[tokio::test]
async fn upstream_error_status_is_relayed_and_never_cached() {
    let upstream = MockUpstream::responding(404, Some("text/plain"), b"not found");
    let router = test_router(config(), upstream);

    let request = Request::builder()
        .uri("/api/tiles?z=1&x=0&y=0")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn network_failure_yields_500_with_single_fetch() {
    let upstream = MockUpstream::failing("dns lookup failed");
    let router = test_router(config(), upstream.clone());

    let request = Request::builder()
        .uri("/api/tiles?z=3&x=4&y=2")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(body["error"].is_string());
    assert_eq!(upstream.call_count(), 1);
}
