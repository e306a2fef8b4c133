// Resume analyzer prompt template and builder.

use crate::llm_client::prompts::{fill_template, FIT_VERDICT_SCALE, JSON_ONLY_INSTRUCTION};

/// Replace: {json_only}, {verdicts}, {resume}, {job_description}
const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert HR recruiter and resume analyst. Analyze the following resume against the job description and provide a comprehensive evaluation.

RESUME:
{resume}

JOB DESCRIPTION:
{job_description}

{json_only}
{
  "candidateScore": 0-100,
  "verdict": "{verdicts}",
  "strengths": ["strength1", "strength2", "strength3"],
  "weaknesses": ["weakness1", "weakness2", "weakness3"],
  "technicalSkillsGap": ["missing_skill1", "missing_skill2"],
  "suggestions": ["improvement1", "improvement2", "improvement3"],
  "summary": "2-3 sentence overall assessment"
}"#;

pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("verdicts", FIT_VERDICT_SCALE),
            ("resume", resume_text),
            ("job_description", job_description),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs_and_shape() {
        let prompt = build_analysis_prompt("Jane Doe, Rust engineer", "Senior Rust role");
        assert!(prompt.contains("RESUME:\nJane Doe, Rust engineer"));
        assert!(prompt.contains("JOB DESCRIPTION:\nSenior Rust role"));
        assert!(prompt.contains("\"technicalSkillsGap\""));
        assert!(prompt.contains("Strong Fit / Good Fit / Moderate Fit / Weak Fit"));
        assert!(prompt.contains("Return ONLY JSON"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            build_analysis_prompt("resume", "jd"),
            build_analysis_prompt("resume", "jd")
        );
    }

    #[test]
    fn test_resume_with_placeholder_text_is_not_rewritten() {
        let prompt = build_analysis_prompt("I wrote {job_description} parsers", "Parser role");
        assert!(prompt.contains("I wrote {job_description} parsers"));
        assert!(prompt.contains("JOB DESCRIPTION:\nParser role"));
    }

    #[test]
    fn test_job_description_cannot_pull_in_the_resume() {
        let prompt = build_analysis_prompt("SECRET RESUME BODY", "Must know {resume} tooling");
        assert_eq!(prompt.matches("SECRET RESUME BODY").count(), 1);
        assert!(prompt.contains("JOB DESCRIPTION:\nMust know {resume} tooling"));
    }
}
