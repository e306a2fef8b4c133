//! Axum route handlers for the Resume Analyzer.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analyzer::analysis::{self, AnalyzerView};
use crate::errors::AppError;
use crate::routes::extractors::{ApiJson, ApiPath};
use crate::routes::multipart::read_uploads;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InputsRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

/// GET /api/v1/sessions/:sid/analyzer
pub async fn handle_get_analyzer(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<AnalyzerView>, AppError> {
    let view = state.sessions.with(sid, |ws| ws.analyzer.view())?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:sid/analyzer/inputs
pub async fn handle_update_inputs(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    ApiJson(req): ApiJson<InputsRequest>,
) -> Result<Json<AnalyzerView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        ws.analyzer.set_inputs(req.resume_text, req.job_description);
        ws.analyzer.view()
    })?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/analyzer/resume
///
/// Only the first file of the form is used.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<AnalyzerView>, AppError> {
    let file = read_uploads(multipart)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("No file was uploaded".to_string()))?;
    let view = analysis::upload_resume(&state.sessions, state.gateway.as_ref(), sid, file).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/analyzer/analysis
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<AnalyzerView>, AppError> {
    let view = analysis::analyze(&state.sessions, state.gateway.as_ref(), sid).await?;
    Ok(Json(view))
}

/// GET /api/v1/sessions/:sid/analyzer/export
///
/// Plain-text pretty JSON, ready for the clipboard.
pub async fn handle_export_analysis(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let text = state.sessions.with(sid, |ws| ws.analyzer.export())??;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// POST /api/v1/sessions/:sid/analyzer/reset
pub async fn handle_reset_analyzer(
    State(state): State<AppState>,
    ApiPath(sid): ApiPath<Uuid>,
) -> Result<Json<AnalyzerView>, AppError> {
    let view = state.sessions.with(sid, |ws| {
        ws.analyzer.reset();
        ws.analyzer.view()
    })?;
    Ok(Json(view))
}
