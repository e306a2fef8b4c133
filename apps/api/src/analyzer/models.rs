use serde::{Deserialize, Serialize};

use crate::extract::deserialize_list;
use crate::scoring::deserialize_score;

/// Gateway report for one resume. `candidateScore` is the only required field;
/// missing lists and text render empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    #[serde(deserialize_with = "deserialize_score")]
    pub candidate_score: u8,
    #[serde(default)]
    pub verdict: String,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub technical_skills_gap: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// What the analysis panel shows: the report, or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisView {
    Report(ResumeAnalysis),
    Error { error: String },
}

/// Summary of the last resume file upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeUpload {
    pub file_name: String,
    pub chars: usize,
}
