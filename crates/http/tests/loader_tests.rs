//! Tests for the loader router

#![cfg(feature = "server")]

use admissions_core::env::{
    AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, CLIENT_KEYS, StaticSecrets, create_server_env,
};
use admissions_core::EnvPayload;
use admissions_http::loader::{LoaderState, router};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

fn state() -> LoaderState {
    let source = EnvPayload::from_pairs([("REMIX_PUBLIC_API_BASE_URL", "https://api.test")]);
    let secrets = StaticSecrets::from_pairs([
        (AWS_ACCESS_KEY_ID, "AKIATEST"),
        (AWS_SECRET_ACCESS_KEY, "super-secret"),
    ]);
    LoaderState::new(create_server_env(&source, &secrets))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_env_payload_has_exactly_client_keys() {
    let (status, body) = get(router(state(), None), "/api/env").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    let object = json.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected = CLIENT_KEYS.to_vec();
    expected.sort_unstable();

    assert_eq!(keys, expected);
    assert_eq!(object["REMIX_PUBLIC_API_BASE_URL"], "https://api.test");
    assert!(object["REMIX_PUBLIC_AWS_REGION"].is_null());
    assert!(!body.contains("super-secret"));
    assert!(!body.contains("AKIATEST"));
}

#[tokio::test]
async fn test_single_key_applies_fallback() {
    let (status, body) = get(router(state(), None), "/api/env/REMIX_PUBLIC_AWS_REGION").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["value"], "us-east-1");
}

#[tokio::test]
async fn test_secret_key_is_not_served() {
    let (status, body) = get(router(state(), None), "/api/env/AWS_SECRET_ACCESS_KEY").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains("super-secret"));

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(router(state(), None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_static_fallback_serves_index() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>portal</html>").unwrap();

    let app = router(state(), Some(dir.path().to_path_buf()));
    let (status, body) = get(app, "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("portal"));
}
