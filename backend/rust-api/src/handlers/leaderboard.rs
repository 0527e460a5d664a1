use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::services::{leaderboard_service::LeaderboardService, AppState};

/// GET /api/v1/leaderboard
pub async fn overall(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = LeaderboardService::new(state.store.clone());
    Json(service.overall().await)
}

/// GET /api/v1/leaderboard/contests/{id}
pub async fn contest(
    State(state): State<Arc<AppState>>,
    Path(contest_id): Path<String>,
) -> impl IntoResponse {
    let service = LeaderboardService::new(state.store.clone());
    Json(service.contest(&contest_id).await)
}
