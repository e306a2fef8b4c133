use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializes a 0-100 score. Floats are rounded, out-of-range values clamped,
/// numeric strings accepted. Anything else is a shape error.
pub fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_score(&value).ok_or_else(|| serde::de::Error::custom(format!("invalid score: {value}")))
}

fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if raw.is_nan() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

/// Display band for a 0-100 fit score. The gateway's own verdict string is
/// always shown as returned; the band only drives presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    #[serde(rename = "Strong Fit")]
    Strong,
    #[serde(rename = "Good Fit")]
    Good,
    #[serde(rename = "Moderate Fit")]
    Moderate,
    #[serde(rename = "Weak Fit")]
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Strong,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Scored {
        #[serde(deserialize_with = "deserialize_score")]
        score: u8,
    }

    fn parse(value: Value) -> Result<u8, serde_json::Error> {
        serde_json::from_value::<Scored>(json!({ "score": value })).map(|s| s.score)
    }

    #[test]
    fn test_integer_score_passes_through() {
        assert_eq!(parse(json!(85)).unwrap(), 85);
    }

    #[test]
    fn test_float_score_is_rounded() {
        assert_eq!(parse(json!(72.6)).unwrap(), 73);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        assert_eq!(parse(json!(140)).unwrap(), 100);
        assert_eq!(parse(json!(-5)).unwrap(), 0);
    }

    #[test]
    fn test_numeric_string_with_percent() {
        assert_eq!(parse(json!("64%")).unwrap(), 64);
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        assert!(parse(json!("high")).is_err());
        assert!(parse(json!(null)).is_err());
        assert!(parse(json!([90])).is_err());
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(40), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(39), ScoreBand::Weak);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Weak);
    }

    #[test]
    fn test_band_serializes_as_verdict_label() {
        assert_eq!(
            serde_json::to_value(ScoreBand::Moderate).unwrap(),
            json!("Moderate Fit")
        );
    }
}
