use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::ClubResult,
    extractors::AppJson,
    middlewares::auth::JwtClaims,
    models::forum::{CreateTopicRequest, ReplyRequest},
    services::{forum_service::ForumService, AppState},
};

/// GET /api/v1/forum/topics
pub async fn list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = ForumService::new(state.store.clone());
    Json(service.list_topics().await)
}

/// GET /api/v1/forum/topics/{id}
pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(topic_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ForumService::new(state.store.clone());
    Ok(Json(service.get_topic(&topic_id).await?))
}

/// POST /api/v1/forum/topics
pub async fn create_topic(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    AppJson(req): AppJson<CreateTopicRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = ForumService::new(state.store.clone());
    let topic = service.create_topic(&claims.sub, req).await?;
    Ok((StatusCode::CREATED, Json(topic)))
}

/// POST /api/v1/forum/topics/{id}/replies
pub async fn reply(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(topic_id): Path<String>,
    AppJson(req): AppJson<ReplyRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = ForumService::new(state.store.clone());
    let reply = service.reply(&claims.sub, &topic_id, req).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}
