//! Axum route handlers for the Interview Coach.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::coach::{self, InterviewView};
use crate::interview::models::{Difficulty, Language};
use crate::routes::extractors::{ApiJson, ApiPath, OptionalJson};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub language: Option<Language>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ClarificationRequest {
    pub question: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionRequest {
    /// Replaces the editor contents before evaluating, when present.
    pub code: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:sid/interview
pub async fn handle_get_interview(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let view = state.sessions.with(sid, |ws| ws.interview.view())?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:sid/interview/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    ApiJson(req): ApiJson<SettingsRequest>,
) -> Result<Json<InterviewView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        let coach = &mut ws.interview;
        if let Some(language) = req.language {
            coach.set_language(language);
        }
        if let Some(difficulty) = req.difficulty {
            coach.difficulty = difficulty;
        }
        coach.view()
    })?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:sid/interview/code
pub async fn handle_update_code(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CodeRequest>,
) -> Result<Json<InterviewView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        ws.interview.code = req.code;
        ws.interview.view()
    })?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/interview/question
///
/// Resets the interview, then generates a problem at the selected difficulty.
pub async fn handle_generate_question(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let view = coach::generate_question(&state.sessions, state.gateway.as_ref(), sid).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/interview/clarifications
pub async fn handle_ask_clarification(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ClarificationRequest>,
) -> Result<Json<InterviewView>, AppError> {
    let view =
        coach::ask_clarification(&state.sessions, state.gateway.as_ref(), sid, &req.question)
            .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/interview/submission
pub async fn handle_submit_solution(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    OptionalJson(body): OptionalJson<SubmissionRequest>,
) -> Result<Json<InterviewView>, AppError> {
    let req = body.unwrap_or_default();
    let view =
        coach::submit_solution(&state.sessions, state.gateway.as_ref(), sid, req.code).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/interview/reset
pub async fn handle_reset_interview(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        ws.interview.reset();
        ws.interview.view()
    })?;
    Ok(Json(view))
}
