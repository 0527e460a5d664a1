use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::services::{event_service::EventService, AppState};

/// GET /api/v1/events - Published events, newest first
pub async fn list_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = EventService::new(state.store.clone());
    Json(service.list_events(false).await)
}
