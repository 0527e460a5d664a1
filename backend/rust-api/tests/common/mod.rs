#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use clubhouse_api::{config::Config, create_router, services::AppState, ClubStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "password";
pub const ADMIN_EMAIL: &str = "admin@vaic.com";
pub const EXPLORER_EMAIL: &str = "explorer@vaic.com";
pub const WIZARD_EMAIL: &str = "wizard@vaic.com";

/// Router over a freshly seeded demo club, plus the state for direct store access.
pub fn create_test_app_with_state() -> (Router, Arc<AppState>) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(AppState::new(Config::for_tests(), ClubStore::seeded()));
    (create_router(app_state.clone()), app_state)
}

pub fn create_test_app() -> Router {
    create_test_app_with_state().0
}

/// Send a request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, "GET", uri, token, None).await
}

pub async fn post(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, "POST", uri, token, Some(body)).await
}

/// Log in with the demo password and return the access token.
pub async fn login_as(app: &Router, email: &str) -> String {
    let (status, body) = post(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": email, "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed for {}: {}", email, body);
    body["access_token"].as_str().unwrap().to_string()
}
