use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::ClubResult,
    extractors::AppJson,
    middlewares::auth::JwtClaims,
    models::{contest::ListContestsQuery, progress::PracticeAnswerRequest},
    services::{contest_service::ContestService, AppState},
};

/// GET /api/v1/contests - Active contests (`?include_inactive=true` for admins)
pub async fn list_contests(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Query(query): Query<ListContestsQuery>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let contests = service
        .list_contests(&claims.sub, query.include_inactive)
        .await?;
    Ok(Json(contests))
}

/// GET /api/v1/contests/{id}
pub async fn get_contest(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(contest_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let contest = service.get_contest(&claims.sub, &contest_id).await?;
    Ok(Json(contest))
}

/// POST /api/v1/contests/{id}/attempts - Start an attempt
pub async fn start_attempt(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(contest_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let attempt = service.start_attempt(&claims.sub, &contest_id).await?;
    Ok((StatusCode::CREATED, Json(attempt)))
}

/// GET /api/v1/contests/{id}/attempts - The caller's completed attempts
pub async fn list_my_attempts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(contest_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let attempts = service.user_attempts(&claims.sub, &contest_id).await?;
    Ok(Json(attempts))
}

/// GET /api/v1/contests/{id}/attempts/current - The caller's open attempt
pub async fn current_attempt(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(contest_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let attempt = service.current_attempt(&claims.sub, &contest_id).await?;
    Ok(Json(attempt))
}

/// POST /api/v1/challenges/{id}/answer - Single-question practice
pub async fn practice_answer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(challenge_id): Path<String>,
    AppJson(req): AppJson<PracticeAnswerRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let response = service
        .practice_answer(&claims.sub, &challenge_id, &req.answer)
        .await?;
    Ok(Json(response))
}
