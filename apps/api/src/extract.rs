//! Structured Response Extractor: recovers a JSON object from free-form gateway text.
//!
//! Heuristic: the payload is the span from the FIRST `{` to the LAST `}` in the
//! text (a greedy `\{.*\}` match), parsed once. There is no brace balancing and no
//! second attempt. Responses carrying several independent objects, or prose with
//! stray braces after the payload, yield `None` even when a valid object exists.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn brace_span() -> &'static Regex {
    static BRACE_SPAN: OnceLock<Regex> = OnceLock::new();
    BRACE_SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("brace span pattern is valid"))
}

/// Returns the parsed first-to-last brace span of `raw`, or `None` when there is
/// no span or it is not valid JSON. Never fails.
pub fn extract_structured(raw: &str) -> Option<Value> {
    let span = brace_span().find(raw)?;
    serde_json::from_str(span.as_str()).ok()
}

/// Extracts the brace span and checks it against the minimal shape `T` a screen
/// needs. Shape mismatches are treated exactly like a failed extraction.
pub fn extract_as<T: DeserializeOwned>(raw: &str) -> Option<T> {
    extract_structured(raw).and_then(|value| serde_json::from_value(value).ok())
}

/// Field decoder for list-of-findings fields. Accepts an array, a single string
/// (one item), or null. Non-string items keep their JSON text.
pub fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a list, found {other}"
            )))
        }
    };
    Ok(items)
}
