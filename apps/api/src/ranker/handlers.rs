//! Axum route handlers for the Resume Ranker.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ranker::invites::{InviteDraft, InviteEdits, SentInvite};
use crate::ranker::ranking::{self, RankerView};
use crate::routes::extractors::{ApiJson, ApiPath, OptionalJson};
use crate::routes::multipart::read_uploads;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

/// GET /api/v1/sessions/:sid/ranker
pub async fn handle_get_ranker(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<RankerView>, AppError> {
    let view = state.sessions.with(sid, |ws| ws.ranker.view())?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:sid/ranker/job-description
pub async fn handle_update_job_description(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    ApiJson(req): ApiJson<JobDescriptionRequest>,
) -> Result<Json<RankerView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        ws.ranker.job_description = req.job_description;
        ws.ranker.view()
    })?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/ranker/resumes
pub async fn handle_upload_resumes(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<RankerView>, AppError> {
    let files = read_uploads(multipart).await?;
    let view = ranking::add_resumes(&state.sessions, state.gateway.as_ref(), sid, files).await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:sid/ranker/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    ApiPath((sid, id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<RankerView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        ws.ranker.remove_resume(id)?;
        Ok::<_, AppError>(ws.ranker.view())
    })??;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/ranker/ranking
pub async fn handle_rank(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<RankerView>, AppError> {
    let view = ranking::rank(&state.sessions, state.gateway.as_ref(), sid).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/ranker/reset
pub async fn handle_reset_ranker(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<RankerView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        ws.ranker.reset();
        ws.ranker.view()
    })?;
    Ok(Json(view))
}

/// GET /api/v1/sessions/:sid/ranker/invites/:rank_index
pub async fn handle_draft_invite(
    State(state): State<AppState>,
    ApiPath((sid, rank_index)): ApiPath<(Uuid, usize)>,
) -> Result<Json<InviteDraft>, AppError> {
    let draft = state
        .sessions
        .with(sid, |ws| ws.ranker.draft_invite(rank_index))??;
    Ok(Json(draft))
}

/// POST /api/v1/sessions/:sid/ranker/invites/:rank_index
///
/// Simulated: nothing is delivered.
pub async fn handle_send_invite(
    State(state): State<AppState>,
    ApiPath((sid, rank_index)): ApiPath<(Uuid, usize)>,
    OptionalJson(edits): OptionalJson<InviteEdits>,
) -> Result<Json<SentInvite>, AppError> {
    let edits = edits.unwrap_or_default();
    let sent = state
        .sessions
        .with(sid, |ws| ws.ranker.send_invite(rank_index, edits))??;
    Ok(Json(sent))
}
