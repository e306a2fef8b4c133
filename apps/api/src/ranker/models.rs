use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::deserialize_list;
use crate::scoring::{deserialize_score, ScoreBand};

/// Characters of resume text kept in an entry's preview.
pub const PREVIEW_CHARS: usize = 150;

/// One uploaded resume. `text` is what the ranking prompt sends; for files that
/// could not be read it holds guidance instead, with `extracted == false`.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeEntry {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    pub preview: String,
    pub extracted: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeEntry {
    pub fn new(name: String, text: String, extracted: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            preview: preview(&text),
            name,
            text,
            extracted,
            uploaded_at: Utc::now(),
        }
    }
}

/// First `PREVIEW_CHARS` characters followed by `...`, even for short texts.
fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// One candidate as ranked by the gateway. Order and rank numbers are trusted
/// as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub rank: u32,
    pub candidate_name: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(default)]
    pub verdict: String,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub overall_assessment: String,
}

/// Minimal shape a ranking reply must have.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub ranked_candidates: Vec<RankedCandidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Sent,
}

/// A ranked candidate as displayed: the gateway's card plus what the service
/// derives for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub rank_index: usize,
    pub candidate: RankedCandidate,
    /// The uploaded resume whose name matches `candidateName` exactly.
    pub resume_id: Option<Uuid>,
    pub score_band: ScoreBand,
    pub invite: Option<InviteStatus>,
}
