pub mod extractors;
pub mod health;
pub mod multipart;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::analyzer::handlers as analyzer;
use crate::interview::handlers as interview;
use crate::ranker::handlers as ranker;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:sid",
            delete(sessions::handle_delete_session),
        )
        // Interview Coach
        .route(
            "/api/v1/sessions/:sid/interview",
            get(interview::handle_get_interview),
        )
        .route(
            "/api/v1/sessions/:sid/interview/settings",
            put(interview::handle_update_settings),
        )
        .route(
            "/api/v1/sessions/:sid/interview/code",
            put(interview::handle_update_code),
        )
        .route(
            "/api/v1/sessions/:sid/interview/question",
            post(interview::handle_generate_question),
        )
        .route(
            "/api/v1/sessions/:sid/interview/clarifications",
            post(interview::handle_ask_clarification),
        )
        .route(
            "/api/v1/sessions/:sid/interview/submission",
            post(interview::handle_submit_solution),
        )
        .route(
            "/api/v1/sessions/:sid/interview/reset",
            post(interview::handle_reset_interview),
        )
        // Resume Analyzer
        .route(
            "/api/v1/sessions/:sid/analyzer",
            get(analyzer::handle_get_analyzer),
        )
        .route(
            "/api/v1/sessions/:sid/analyzer/inputs",
            put(analyzer::handle_update_inputs),
        )
        .route(
            "/api/v1/sessions/:sid/analyzer/resume",
            post(analyzer::handle_upload_resume),
        )
        .route(
            "/api/v1/sessions/:sid/analyzer/analysis",
            post(analyzer::handle_analyze),
        )
        .route(
            "/api/v1/sessions/:sid/analyzer/export",
            get(analyzer::handle_export_analysis),
        )
        .route(
            "/api/v1/sessions/:sid/analyzer/reset",
            post(analyzer::handle_reset_analyzer),
        )
        // Resume Ranker
        .route(
            "/api/v1/sessions/:sid/ranker",
            get(ranker::handle_get_ranker),
        )
        .route(
            "/api/v1/sessions/:sid/ranker/job-description",
            put(ranker::handle_update_job_description),
        )
        .route(
            "/api/v1/sessions/:sid/ranker/resumes",
            post(ranker::handle_upload_resumes),
        )
        .route(
            "/api/v1/sessions/:sid/ranker/resumes/:id",
            delete(ranker::handle_delete_resume),
        )
        .route(
            "/api/v1/sessions/:sid/ranker/ranking",
            post(ranker::handle_rank),
        )
        .route(
            "/api/v1/sessions/:sid/ranker/reset",
            post(ranker::handle_reset_ranker),
        )
        .route(
            "/api/v1/sessions/:sid/ranker/invites/:rank_index",
            get(ranker::handle_draft_invite).post(ranker::handle_send_invite),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
