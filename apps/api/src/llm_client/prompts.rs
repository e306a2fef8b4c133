// Shared prompt fragments.
// Each workflow that needs gateway calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to every prompt that expects a structured reply.
/// The extractor makes a single parse attempt, so this must stay explicit.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY JSON with NO additional text:";

/// Ordered fit verdict scale shared by the analyzer and the ranker.
pub const FIT_VERDICT_SCALE: &str = "Strong Fit / Good Fit / Moderate Fit / Weak Fit";

/// Substitutes `{key}` placeholders in one left-to-right pass. Inserted values
/// are never rescanned, so text that happens to contain a placeholder is kept
/// as written. Braces that do not open a known key are copied through.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values.iter().find(|(key, _)| {
            tail.strip_prefix(*key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
