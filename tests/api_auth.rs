use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use membership_portal::{app, connect_pool_lazy, AppConfig, AppState, StaticTokenProvider};
use serde_json::Value;
use tower::ServiceExt; // for `app.oneshot()`

const BODY_LIMIT: usize = 1024;

/// Router over a pool that never connects; only paths that reject before any query are usable.
fn test_app() -> Router {
    let config = AppConfig {
        database_url: "postgres://portal@127.0.0.1:1/portal".into(),
        ..AppConfig::default()
    };
    let pool = connect_pool_lazy(&config).unwrap();
    let tokens = HashMap::from([("good-token".to_string(), "admin@uottawa.ca".to_string())]);
    let state = AppState::new(pool, Arc::new(StaticTokenProvider::new(tokens)));
    app(state, BODY_LIMIT)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn version_reports_package() {
    let response = test_app()
        .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "membership-portal");
}

#[tokio::test]
async fn info_lists_supported_languages() {
    let response = test_app()
        .oneshot(Request::builder().uri("/info").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["api_prefix"], "/api");
    assert_eq!(body["languages"], serde_json::json!(["en", "fr"]));
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let response = test_app()
        .oneshot(Request::builder().uri("/api/all-accounts").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/api/update-account/4/grant-admin")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/active-account")
                .header(header::AUTHORIZATION, "Basic Z29vZC10b2tlbg==")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_verb_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/api/all-members")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let payload = vec![b' '; BODY_LIMIT + 1];
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/register-keyword")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, payload.len())
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = test_app()
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
