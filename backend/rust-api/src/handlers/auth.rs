use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::{
    error::ClubResult,
    extractors::AppJson,
    middlewares::auth::JwtClaims,
    models::user::{LoginRequest, RegisterRequest},
    services::{auth_service::AuthService, AppState},
};

pub(crate) fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.store.clone(),
        state.jwt.clone(),
        state.config.access_token_ttl_seconds,
        state.config.demo_password.clone(),
    )
}

/// POST /api/v1/auth/register - Register a new member
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ClubResult<impl IntoResponse> {
    tracing::info!("Registering new user: {}", req.email);

    let response = auth_service(&state).register(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login - Login with email and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> ClubResult<impl IntoResponse> {
    tracing::info!("Login attempt for user: {}", req.email);

    let response = auth_service(&state).login(req).await?;
    Ok(Json(response))
}

/// GET /api/v1/auth/me - Fresh profile of the signed-in user
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> ClubResult<impl IntoResponse> {
    let user = auth_service(&state).me(&claims.sub).await?;
    Ok(Json(user))
}

/// POST /api/v1/auth/logout - Revoke the presented access token
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> impl IntoResponse {
    auth_service(&state).logout(&claims).await;
    StatusCode::NO_CONTENT
}
