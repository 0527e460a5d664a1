use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    error::ClubResult,
    extractors::AppJson,
    middlewares::auth::JwtClaims,
    models::contest::{AddChallengeRequest, CreateContestRequest, UpdateContestRequest},
    services::{contest_service::ContestService, AppState},
};

/// POST /admin/contests - Create an empty contest
pub async fn create_contest(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    AppJson(req): AppJson<CreateContestRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let contest = service.create_contest(&claims.sub, req).await?;
    Ok((StatusCode::CREATED, Json(contest)))
}

/// PATCH /admin/contests/{id}
pub async fn update_contest(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(contest_id): Path<String>,
    AppJson(req): AppJson<UpdateContestRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let contest = service
        .update_contest(&claims.sub, &contest_id, req)
        .await?;
    Ok(Json(contest))
}

/// DELETE /admin/contests/{id} - Challenges go with it, attempts stay
pub async fn delete_contest(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(contest_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    service.delete_contest(&claims.sub, &contest_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/contests/{id}/challenges - Append a challenge
pub async fn add_challenge(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(contest_id): Path<String>,
    AppJson(req): AppJson<AddChallengeRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let challenge = service
        .add_challenge(&claims.sub, &contest_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(challenge)))
}
