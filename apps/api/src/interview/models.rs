use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::scoring::deserialize_score;

/// Languages offered by the coach, each with an editor starter template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    Python,
    Java,
    #[default]
    #[serde(rename = "C++")]
    Cpp,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Language::JavaScript => "function solution() {\n  \n}",
            Language::Python => "def solution():\n    pass",
            Language::Java => {
                "class Solution {\n  public static void solution() {\n    \n  }\n}"
            }
            Language::Cpp => {
                "#include <bits/stdc++.h>\nusing namespace std;\n\nvoid solution() {\n\n}"
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

/// Hiring verdict scale, strongest first.
pub const HIRE_VERDICTS: [&str; 6] = [
    "Strong Hire",
    "Hire",
    "Leaning Hire",
    "Maybe",
    "Leaning No Hire",
    "No Hire",
];

/// A generated coding problem. Only `problem` is required; the other sections
/// render empty when the gateway leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    #[serde(deserialize_with = "deserialize_text")]
    pub problem: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub examples: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub constraints: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub follow_up: String,
}

/// Per-criterion 0-100 scores of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScores {
    #[serde(deserialize_with = "deserialize_score")]
    pub correctness: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub efficiency: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub code_quality: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub communication: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub problem_solving: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub scores: CriterionScores,
    #[serde(default)]
    pub verdict: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub feedback: String,
}

/// Accepts a string, or a list of strings joined with newlines
/// (models often return `examples` and `constraints` as arrays).
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}
