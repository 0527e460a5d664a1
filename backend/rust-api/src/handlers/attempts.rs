use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::ClubResult,
    extractors::AppJson,
    middlewares::auth::JwtClaims,
    models::attempt::SubmitContestAnswerRequest,
    services::{contest_service::ContestService, AppState},
};

/// GET /api/v1/attempts/{id}
pub async fn get_attempt(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(attempt_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let attempt = service.get_attempt(&claims.sub, &attempt_id).await?;
    Ok(Json(attempt))
}

/// POST /api/v1/attempts/{id}/answers
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(attempt_id): Path<String>,
    AppJson(req): AppJson<SubmitContestAnswerRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let response = service.submit_answer(&claims.sub, &attempt_id, req).await?;
    Ok(Json(response))
}

/// POST /api/v1/attempts/{id}/finish
pub async fn finish_attempt(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(attempt_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let attempt = service.finish_attempt(&claims.sub, &attempt_id).await?;
    Ok(Json(attempt))
}
