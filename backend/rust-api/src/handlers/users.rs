use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::ClubResult,
    extractors::AppJson,
    handlers::auth::auth_service,
    middlewares::auth::JwtClaims,
    models::user::{UpdateProfileRequest, UserScoreResponse},
    services::{leaderboard_service::LeaderboardService, AppState},
};

/// GET /api/v1/users/{id}/score - Cumulative score, 0 for unknown users
pub async fn get_user_score(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let score = auth_service(&state).get_user_score(&user_id).await;
    Json(UserScoreResponse { user_id, score })
}

/// PATCH /api/v1/users/{id} - Update own profile (admins may update anyone)
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(user_id): Path<String>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> ClubResult<impl IntoResponse> {
    let user = auth_service(&state)
        .update_profile(&claims.sub, &user_id, req)
        .await?;
    Ok(Json(user))
}

/// GET /api/v1/users/me/stats - Attempt statistics for the profile page
pub async fn my_stats(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> ClubResult<impl IntoResponse> {
    let service = LeaderboardService::new(state.store.clone());
    let stats = service.profile_stats(&claims.sub).await?;
    Ok(Json(stats))
}
