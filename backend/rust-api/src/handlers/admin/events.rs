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
    models::event::{CreateEventRequest, UpdateEventRequest},
    services::{event_service::EventService, AppState},
};

/// GET /admin/events - All events including drafts
pub async fn list_all_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = EventService::new(state.store.clone());
    Json(service.list_events(true).await)
}

/// POST /admin/events
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    AppJson(req): AppJson<CreateEventRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = EventService::new(state.store.clone());
    let event = service.create_event(&claims.sub, req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PATCH /admin/events/{id}
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(event_id): Path<String>,
    AppJson(req): AppJson<UpdateEventRequest>,
) -> ClubResult<impl IntoResponse> {
    let service = EventService::new(state.store.clone());
    let event = service.update_event(&claims.sub, &event_id, req).await?;
    Ok(Json(event))
}

/// DELETE /admin/events/{id}
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(event_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = EventService::new(state.store.clone());
    service.delete_event(&claims.sub, &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
