use axum::{
    extract::{Extension, Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    error::ClubResult,
    middlewares::auth::JwtClaims,
    services::{forum_service::ForumService, AppState},
};

/// POST /admin/forum/topics/{id}/pin - Toggle the pinned flag
pub async fn toggle_pin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(topic_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ForumService::new(state.store.clone());
    let topic = service.toggle_pin(&claims.sub, &topic_id).await?;
    Ok(Json(topic))
}
