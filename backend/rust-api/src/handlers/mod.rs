use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use std::sync::Arc;

use crate::metrics;
use crate::services::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    let open_attempts = store.attempts().iter().filter(|a| a.is_open()).count();

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "clubhouse-api",
            "version": env!("CARGO_PKG_VERSION"),
            "store": {
                "users": store.users().len(),
                "contests": store.contests().len(),
                "attempts": store.attempts().len(),
                "open_attempts": open_attempts,
                "events": store.events().len(),
                "topics": store.topics().len(),
                "revoked_tokens": store.revoked_token_count(),
            }
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

/// Metrics authentication middleware - protects /metrics endpoint with HTTP Basic Auth
pub async fn metrics_auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let encoded = auth_header
        .strip_prefix("Basic ")
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let credentials = String::from_utf8(decoded).map_err(|_| StatusCode::UNAUTHORIZED)?;

    // username:password
    if credentials != state.config.metrics_auth {
        tracing::warn!("Rejected metrics scrape with wrong credentials");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

pub mod admin;
pub mod attempts;
pub mod auth;
pub mod contests;
pub mod events;
pub mod forum;
pub mod leaderboard;
pub mod sse;
pub mod users;
