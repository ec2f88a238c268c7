//! Interpretation of raw service payloads
//!
//! The service may wrap its JSON in prose or a fenced code block. Extraction
//! tries the fenced body first, then the span from the first `{` to the last
//! `}`. Anything still unparseable becomes a degraded outcome carrying the
//! raw text.

use serde::Serialize;

use super::wire::{AnalysisResult, KesslerRisk};

const UNPARSED_ASSESSMENT: &str = "Unable to parse prediction data";

/// Tagged result of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    /// The service answered in the expected shape
    Complete(AnalysisResult),
    /// The service answered, but not in the expected shape
    Degraded { raw: String, result: AnalysisResult },
}

impl AnalysisOutcome {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            Self::Complete(result) => result,
            Self::Degraded { result, .. } => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            Self::Complete(result) => result,
            Self::Degraded { result, .. } => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Degraded outcome for text that could not be parsed
    pub fn degraded(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self::Degraded {
            result: AnalysisResult {
                predictions: Vec::new(),
                overall_risk_assessment: UNPARSED_ASSESSMENT.to_string(),
                kessler_risk: KesslerRisk::Low,
                summary: raw.clone(),
            },
            raw,
        }
    }
}

/// Parse a raw payload. Never fails.
pub fn parse_payload(raw: &str) -> AnalysisOutcome {
    let candidates = [fenced_body(raw), outer_object(raw)];

    for candidate in candidates.into_iter().flatten() {
        match serde_json::from_str::<AnalysisResult>(candidate) {
            Ok(mut result) => {
                let clamped = result
                    .predictions
                    .iter_mut()
                    .map(|p| p.clamp_ranges())
                    .filter(|&changed| changed)
                    .count();
                if clamped > 0 {
                    log::warn!("Clamped out-of-range fields on {} predictions", clamped);
                }
                return AnalysisOutcome::Complete(result);
            }
            Err(e) => log::debug!("Payload candidate rejected: {}", e),
        }
    }

    log::warn!("Conjunction service payload could not be parsed; returning degraded result");
    AnalysisOutcome::degraded(raw)
}

/// Body of the first fenced code block, without its language tag
fn fenced_body(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let after = &raw[open + 3..];

    // A language tag runs to the end of the opening line
    let body_start = match after.find('\n') {
        Some(nl) if after[..nl].trim().chars().all(|c| c.is_ascii_alphanumeric()) => nl + 1,
        _ => 0,
    };
    let body = &after[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Span from the first `{` to the last `}`
fn outer_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::wire::ConjunctionRisk;

    const EXAMPLE: &str = r#"{"predictions":[{"object1_name":"ISS","object2_name":"Deb-1","risk_score":92,"risk_level":"critical","minimum_distance_km":1.8,"time_to_closest_approach_hours":2.1,"recommended_action":"maneuver"}],"kessler_risk":"high","summary":"elevated risk"}"#;

    #[test]
    fn test_example_payload() {
        let outcome = parse_payload(EXAMPLE);
        assert!(!outcome.is_degraded());

        let result = outcome.result();
        assert_eq!(result.predictions.len(), 1);
        assert_eq!(result.kessler_risk, KesslerRisk::High);
        assert_eq!(result.critical_count(), 1);

        let p = &result.predictions[0];
        assert_eq!(p.object1_name, "ISS");
        assert_eq!(p.object2_name, "Deb-1");
        assert_eq!(p.risk_level, ConjunctionRisk::Critical);
        assert_eq!(p.risk_score, 92.0);
        assert_eq!(p.minimum_distance_km, 1.8);
        assert_eq!(p.time_to_closest_approach_hours, 2.1);
        assert_eq!(p.recommended_action, "maneuver");
        assert_eq!(p.analysis, "");
    }

    #[test]
    fn test_fenced_payload_matches_plain() {
        let fenced = format!("```json\n{}\n```", EXAMPLE);
        assert_eq!(parse_payload(&fenced), parse_payload(EXAMPLE));

        let untagged = format!("Here you go:\n```\n{}\n```\nLet me know.", EXAMPLE);
        assert_eq!(parse_payload(&untagged), parse_payload(EXAMPLE));
    }

    #[test]
    fn test_prose_wrapped_payload() {
        let wrapped = format!("Analysis follows. {} End of report.", EXAMPLE);
        assert_eq!(parse_payload(&wrapped), parse_payload(EXAMPLE));
    }

    #[test]
    fn test_single_line_fence() {
        let fenced = format!("```json {}```", EXAMPLE);
        assert_eq!(parse_payload(&fenced), parse_payload(EXAMPLE));
    }

    #[test]
    fn test_prose_is_degraded() {
        let raw = "All objects look fine, no conjunctions expected.";
        let outcome = parse_payload(raw);

        match &outcome {
            AnalysisOutcome::Degraded { raw: kept, result } => {
                assert_eq!(kept, raw);
                assert!(result.predictions.is_empty());
                assert_eq!(result.kessler_risk, KesslerRisk::Low);
                assert_eq!(result.summary, raw);
            }
            other => panic!("expected degraded outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shape_is_degraded() {
        let raw = r#"{"predictions":[{"object1_name":"A","object2_name":"B","risk_score":"high","risk_level":"critical"}]}"#;
        assert!(parse_payload(raw).is_degraded());

        let raw = r#"{"kessler_risk":"catastrophic"}"#;
        assert!(parse_payload(raw).is_degraded());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let outcome = parse_payload(r#"{"predictions":[],"summary":"quiet"}"#);
        assert!(!outcome.is_degraded());

        let result = outcome.result();
        assert!(result.predictions.is_empty());
        assert_eq!(result.kessler_risk, KesslerRisk::Low);
        assert_eq!(result.overall_risk_assessment, "");
        assert_eq!(result.summary, "quiet");
    }

    #[test]
    fn test_foreign_objects_are_degraded() {
        let replies = [
            r#"{"error":"AI gateway error"}"#,
            "Sorry: {}",
            r#"{"choices":[{"message":{"content":"x"}}]}"#,
            r#"{"summary":"quiet"}"#,
        ];
        for raw in replies {
            let outcome = parse_payload(raw);
            assert!(outcome.is_degraded(), "{} should be degraded", raw);
            assert_eq!(outcome.result().summary, raw);
            assert!(outcome.result().predictions.is_empty());
        }
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let raw = r#"{"predictions":[{"object1_name":"A","object2_name":"B","risk_score":250,"risk_level":"warning","minimum_distance_km":-3}]}"#;
        let outcome = parse_payload(raw);
        let p = &outcome.result().predictions[0];
        assert_eq!(p.risk_score, 100.0);
        assert_eq!(p.minimum_distance_km, 0.0);
    }

    #[test]
    fn test_extraction_helpers() {
        assert_eq!(fenced_body("no fence"), None);
        assert_eq!(fenced_body("```json\n{}\n```"), Some("{}"));
        assert_eq!(outer_object("x } y { z"), None);
        assert_eq!(outer_object("a {1} b {2} c"), Some("{1} b {2}"));
    }
}
