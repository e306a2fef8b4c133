// Resume ranker prompt template and builder.

use crate::llm_client::prompts::{fill_template, FIT_VERDICT_SCALE, JSON_ONLY_INSTRUCTION};
use crate::ranker::models::ResumeEntry;

/// Separates candidate blocks in the ranking prompt.
pub const CANDIDATE_DELIMITER: &str = "\n\n---NEXT_CANDIDATE---\n\n";

/// Replace: {json_only}, {verdicts}, {job_description}, {resumes}
const RANKING_PROMPT_TEMPLATE: &str = r#"You are an expert HR recruiter. Rank the following candidates based on the job description.

JOB DESCRIPTION:
{job_description}

RESUMES (Each candidate is marked with CANDIDATE_NAME):
{resumes}

Rank them from best to worst fit. For each candidate, use the exact filename as the candidateName in your response.

{json_only}
{
  "rankedCandidates": [
    {
      "rank": 1,
      "candidateName": "EXACT_FILENAME_HERE",
      "score": 0-100,
      "verdict": "{verdicts}",
      "strengths": ["strength1", "strength2"],
      "gaps": ["gap1", "gap2"],
      "overallAssessment": "1-2 sentence summary"
    }
  ]
}"#;

fn candidate_block(entry: &ResumeEntry) -> String {
    format!("CANDIDATE_NAME: {}\nCONTENT:\n{}", entry.name, entry.text)
}

pub fn build_ranking_prompt(job_description: &str, resumes: &[ResumeEntry]) -> String {
    let blocks = resumes
        .iter()
        .map(candidate_block)
        .collect::<Vec<_>>()
        .join(CANDIDATE_DELIMITER);

    fill_template(
        RANKING_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("verdicts", FIT_VERDICT_SCALE),
            ("job_description", job_description),
            ("resumes", &blocks),
        ],
    )
}
