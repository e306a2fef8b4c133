//! Resume Ranker state and operations.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::controller::{settle_structured, Operation, OperationState};
use crate::errors::AppError;
use crate::files::{convert, PdfPolicy, UploadedFile};
use crate::llm_client::AiGateway;
use crate::ranker::invites::{InviteDraft, InviteEdits, SentInvite};
use crate::ranker::models::{
    CandidateView, InviteStatus, RankedCandidate, RankingResult, ResumeEntry,
};
use crate::ranker::prompts::build_ranking_prompt;
use crate::scoring::ScoreBand;
use crate::sessions::SessionStore;

pub const MISSING_INPUTS: &str = "Please upload resumes and provide a job description";
pub const RANKING_FAILED: &str = "Failed to rank resumes. Please try again.";

#[derive(Debug, Default)]
pub struct ResumeRanker {
    pub job_description: String,
    resumes: Vec<ResumeEntry>,
    ranking: Operation<Vec<RankedCandidate>>,
    invites: HashMap<usize, InviteStatus>,
}

#[derive(Debug, Serialize)]
pub struct RankerView {
    pub job_description: String,
    pub resumes: Vec<ResumeEntry>,
    pub ranking: OperationState<Vec<CandidateView>>,
}

impl ResumeRanker {
    pub fn remove_resume(&mut self, id: Uuid) -> Result<ResumeEntry, AppError> {
        let index = self
            .resumes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
        Ok(self.resumes.remove(index))
    }

    /// Back to the upload step: rankings and invite statuses are dropped,
    /// uploaded resumes are kept.
    pub fn reset(&mut self) {
        self.ranking.reset();
        self.invites.clear();
    }

    /// Exact-name correlation; the first matching upload wins.
    fn resume_id_for(&self, candidate_name: &str) -> Option<Uuid> {
        self.resumes
            .iter()
            .find(|r| r.name == candidate_name)
            .map(|r| r.id)
    }

    fn candidate_views(&self, ranked: &[RankedCandidate]) -> Vec<CandidateView> {
        ranked
            .iter()
            .enumerate()
            .map(|(rank_index, candidate)| CandidateView {
                rank_index,
                resume_id: self.resume_id_for(&candidate.candidate_name),
                score_band: ScoreBand::for_score(candidate.score),
                invite: self.invites.get(&rank_index).copied(),
                candidate: candidate.clone(),
            })
            .collect()
    }

    pub fn view(&self) -> RankerView {
        RankerView {
            job_description: self.job_description.clone(),
            resumes: self.resumes.clone(),
            ranking: self.ranking.state().map(|ranked| self.candidate_views(ranked)),
        }
    }

    fn ranked_candidate(&self, rank_index: usize) -> Result<&RankedCandidate, AppError> {
        self.ranking
            .data()
            .and_then(|ranked| ranked.get(rank_index))
            .ok_or_else(|| {
                AppError::NotFound(format!("No ranked candidate at position {rank_index}"))
            })
    }

    /// Default invitation for the candidate at `rank_index` (0-based, display order).
    pub fn draft_invite(&self, rank_index: usize) -> Result<InviteDraft, AppError> {
        let candidate = self.ranked_candidate(rank_index)?;
        Ok(InviteDraft::for_candidate(
            rank_index,
            &candidate.candidate_name,
        ))
    }

    /// Simulated send. Sending again re-composes the message; the status stays `sent`.
    pub fn send_invite(
        &mut self,
        rank_index: usize,
        edits: InviteEdits,
    ) -> Result<SentInvite, AppError> {
        let draft = self.draft_invite(rank_index)?.edited(edits)?;
        self.invites.insert(rank_index, InviteStatus::Sent);
        info!(
            "Simulated interview invite to {} for '{}' (not delivered)",
            draft.email, draft.candidate_name
        );
        Ok(SentInvite::simulate(draft))
    }
}

/// Adds one entry per file, in upload order. PDFs are not parsed here; they
/// store upload advice instead. Unreadable files store guidance.
pub async fn add_resumes(
    sessions: &SessionStore,
    gateway: &dyn AiGateway,
    session_id: Uuid,
    files: Vec<UploadedFile>,
) -> Result<RankerView, AppError> {
    // Fail fast on an unknown session before spending OCR calls.
    sessions.with(session_id, |_| ())?;

    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let converted = convert(&file, gateway, PdfPolicy::Advise).await;
        if !converted.extracted {
            warn!("Resume '{}' stored with guidance instead of text", file.name);
        }
        entries.push(ResumeEntry::new(file.name, converted.text, converted.extracted));
    }

    sessions.with(session_id, |ws| {
        info!("Session {session_id}: {} resume(s) uploaded", entries.len());
        ws.ranker.resumes.extend(entries);
        ws.ranker.view()
    })
}

/// Ranks every uploaded resume against the job description. The gateway's order
/// is kept as returned.
pub async fn rank(
    sessions: &SessionStore,
    gateway: &dyn AiGateway,
    session_id: Uuid,
) -> Result<RankerView, AppError> {
    let (request, prompt) = sessions.with(session_id, |ws| {
        let ranker = &mut ws.ranker;
        if ranker.resumes.is_empty() || ranker.job_description.trim().is_empty() {
            return Err(AppError::Validation(MISSING_INPUTS.to_string()));
        }
        ranker.invites.clear();
        let prompt = build_ranking_prompt(&ranker.job_description, &ranker.resumes);
        Ok((ranker.ranking.begin(), prompt))
    })??;

    info!("Ranking resumes for session {session_id}");
    let reply = gateway.chat(&prompt).await;
    let outcome = settle_structured::<RankingResult>(reply, RANKING_FAILED)
        .map(|result| result.ranked_candidates);

    sessions.with(session_id, |ws| {
        let ranker = &mut ws.ranker;
        if ranker.ranking.complete(request, outcome) {
            if let Some(ranked) = ranker.ranking.data() {
                let unmatched = ranked
                    .iter()
                    .filter(|c| ranker.resume_id_for(&c.candidate_name).is_none())
                    .count();
                if unmatched > 0 {
                    warn!("{unmatched} ranked candidate(s) do not match an uploaded resume name");
                }
            }
        }
        ranker.view()
    })
}
