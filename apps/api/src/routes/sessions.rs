use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extractors::ApiPath;
use crate::sessions::SessionCreated;
use crate::state::AppState;

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    (StatusCode::CREATED, Json(state.sessions.create()))
}

/// DELETE /api/v1/sessions/:sid
pub async fn handle_delete_session(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(sid)?;
    Ok(StatusCode::NO_CONTENT)
}
