//! Resume Analyzer state and operations.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analyzer::models::{AnalysisView, ResumeAnalysis, ResumeUpload};
use crate::analyzer::prompts::build_analysis_prompt;
use crate::controller::{settle_structured, Operation, OperationState};
use crate::errors::AppError;
use crate::files::{convert, PdfPolicy, UploadedFile};
use crate::llm_client::AiGateway;
use crate::scoring::ScoreBand;
use crate::sessions::SessionStore;

pub const MISSING_INPUTS: &str = "Please provide both resume and job description";
pub const ANALYSIS_FAILED: &str =
    "Failed to analyze resume. Please try again with a clearer resume.";

#[derive(Debug, Default)]
pub struct ResumeAnalyzer {
    pub resume_text: String,
    pub job_description: String,
    pub file_name: Option<String>,
    upload: Operation<ResumeUpload>,
    analysis: Operation<ResumeAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzerView {
    pub resume_text: String,
    pub job_description: String,
    pub file_name: Option<String>,
    pub upload: OperationState<ResumeUpload>,
    pub loading: bool,
    pub analysis: Option<AnalysisView>,
    pub score_band: Option<ScoreBand>,
}

impl ResumeAnalyzer {
    /// Pasted resume text replaces any uploaded file's text.
    pub fn set_inputs(&mut self, resume_text: Option<String>, job_description: Option<String>) {
        if let Some(text) = resume_text {
            self.resume_text = text;
            self.file_name = None;
        }
        if let Some(jd) = job_description {
            self.job_description = jd;
        }
    }

    /// Clears the analysis panel. Inputs are kept.
    pub fn reset(&mut self) {
        self.analysis.reset();
    }

    pub fn analysis_view(&self) -> Option<AnalysisView> {
        match self.analysis.state() {
            OperationState::Success { data } => Some(AnalysisView::Report(data.clone())),
            OperationState::Failed { message } => Some(AnalysisView::Error {
                error: message.clone(),
            }),
            OperationState::Idle | OperationState::Loading => None,
        }
    }

    /// Pretty JSON of the analysis panel, as copied to the clipboard.
    pub fn export(&self) -> Result<String, AppError> {
        let view = self
            .analysis_view()
            .ok_or_else(|| AppError::NotFound("No analysis to export".to_string()))?;
        serde_json::to_string_pretty(&view).map_err(|e| AppError::Internal(e.into()))
    }

    pub fn view(&self) -> AnalyzerView {
        AnalyzerView {
            resume_text: self.resume_text.clone(),
            job_description: self.job_description.clone(),
            file_name: self.file_name.clone(),
            upload: self.upload.state().clone(),
            loading: self.analysis.is_loading(),
            analysis: self.analysis_view(),
            score_band: self
                .analysis
                .data()
                .map(|a| ScoreBand::for_score(a.candidate_score)),
        }
    }
}

/// Reads one resume file into the analyzer. PDFs are parsed, images go to OCR.
/// On failure the resume text is untouched and the upload carries guidance.
pub async fn upload_resume(
    sessions: &SessionStore,
    gateway: &dyn AiGateway,
    session_id: Uuid,
    file: UploadedFile,
) -> Result<AnalyzerView, AppError> {
    let request = sessions.with(session_id, |ws| ws.analyzer.upload.begin())?;

    let converted = convert(&file, gateway, PdfPolicy::Extract).await;
    let outcome = if converted.extracted {
        Ok(ResumeUpload {
            file_name: file.name.clone(),
            chars: converted.text.chars().count(),
        })
    } else {
        Err(converted.text.clone())
    };

    sessions.with(session_id, |ws| {
        let analyzer = &mut ws.analyzer;
        if analyzer.upload.complete(request, outcome) && converted.extracted {
            analyzer.resume_text = converted.text;
            analyzer.file_name = Some(file.name);
        }
        analyzer.view()
    })
}

/// Scores the resume against the job description.
pub async fn analyze(
    sessions: &SessionStore,
    gateway: &dyn AiGateway,
    session_id: Uuid,
) -> Result<AnalyzerView, AppError> {
    let (request, prompt) = sessions.with(session_id, |ws| {
        let analyzer = &mut ws.analyzer;
        if analyzer.resume_text.trim().is_empty() || analyzer.job_description.trim().is_empty() {
            return Err(AppError::Validation(MISSING_INPUTS.to_string()));
        }
        let prompt = build_analysis_prompt(&analyzer.resume_text, &analyzer.job_description);
        Ok((analyzer.analysis.begin(), prompt))
    })??;

    info!("Analyzing resume for session {session_id}");
    let reply = gateway.chat(&prompt).await;
    let outcome = settle_structured::<ResumeAnalysis>(reply, ANALYSIS_FAILED);

    sessions.with(session_id, |ws| {
        let analyzer = &mut ws.analyzer;
        if analyzer.analysis.complete(request, outcome) {
            if let Some(report) = analyzer.analysis.data() {
                info!(
                    "Session {session_id} resume scored {} ({})",
                    report.candidate_score, report.verdict
                );
            }
        }
        analyzer.view()
    })
}
