// Interview coach prompt templates and builders.
// Builders are pure: identical inputs always produce identical prompt text.

use crate::interview::models::{Difficulty, Language, HIRE_VERDICTS};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};

/// Replace: {difficulty}, {json_only}
const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate a FAANG-style {difficulty} coding interview problem.

{json_only}
{
  "problem": "Clear problem statement",
  "examples": "Example 1:\nInput: ...\nOutput: ...",
  "constraints": "List of constraints",
  "followUp": "Expected follow-up question"
}"#;

/// Replace: {language}, {problem}, {code}, {verdicts}, {json_only}
const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are a FAANG interviewer evaluating a coding solution.

Language: {language}
Problem: {problem}

Candidate Solution:
{code}

Evaluate the solution.

{json_only}
{
  "scores": {
    "correctness": 0-100,
    "efficiency": 0-100,
    "codeQuality": 0-100,
    "communication": 0-100,
    "problemSolving": 0-100
  },
  "verdict": "{verdicts}",
  "feedback": "Detailed feedback"
}"#;

/// Replace: {question}
const CLARIFICATION_PROMPT_TEMPLATE: &str = "You are a professional FAANG interviewer.
Answer the candidate's clarification question briefly and realistically.

Question: {question}

Keep answer to 1-2 sentences.";

pub fn build_question_prompt(difficulty: Difficulty) -> String {
    fill_template(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("difficulty", &difficulty.to_string()),
        ],
    )
}

pub fn build_evaluation_prompt(language: Language, problem: &str, code: &str) -> String {
    fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("verdicts", &HIRE_VERDICTS.join(" / ")),
            ("language", language.label()),
            ("problem", problem),
            ("code", code),
        ],
    )
}

/// Plain-text reply expected; no structured-output instruction.
pub fn build_clarification_prompt(question: &str) -> String {
    fill_template(CLARIFICATION_PROMPT_TEMPLATE, &[("question", question)])
}
