//! crates/qa_core/src/policy.rs
//! Verdict tone and LLM-ready policies.
//!
//! Readiness has two incompatible sources across backend contracts (a fixed
//! threshold on Arc Rank, or a backend boolean). Both are exposed as named
//! policies; the integration picks one.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::errors::CoreError;
use crate::schema::{AnalysisResult, SchemaVersion};
use crate::scores::PLACEHOLDER;

/// Normalised verdict labels that get the positive treatment.
pub const POSITIVE_VERDICTS: &[&str] = &["ready", "good", "excellent", "partially ready"];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    /// CSS class used by the HTML adapter.
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Positive => "verdict-positive",
            Tone::Negative => "verdict-negative",
        }
    }
}

/// Lowercase, trimmed, `_`/`-` read as spaces, inner whitespace collapsed.
pub fn normalize_verdict(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn verdict_tone(raw: Option<&str>) -> Tone {
    match raw {
        Some(v) if POSITIVE_VERDICTS.contains(&normalize_verdict(v).as_str()) => Tone::Positive,
        _ => Tone::Negative,
    }
}

/// Display text plus tone for a verdict badge.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Verdict {
    pub text: String,
    pub tone: Tone,
}

impl Verdict {
    /// Blank verdicts count as absent.
    pub fn from_raw(raw: Option<&str>) -> Verdict {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(v) => Verdict { text: v.to_string(), tone: verdict_tone(Some(v)) },
            None => Verdict { text: PLACEHOLDER.to_string(), tone: Tone::Negative },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LlmReadyPolicy {
    /// Ready iff the displayed (rounded) Arc Rank is at least the threshold.
    ScoreThreshold(u8),
    /// Trust `evaluation.llm_ready` from the backend.
    BackendFlag,
}

impl LlmReadyPolicy {
    pub const DEFAULT_THRESHOLD: u8 = 60;

    /// The policy each backend contract is shown with by default.
    pub fn native_for(schema: SchemaVersion) -> LlmReadyPolicy {
        match schema {
            SchemaVersion::ScoreMatrix => LlmReadyPolicy::ScoreThreshold(Self::DEFAULT_THRESHOLD),
            SchemaVersion::Evaluation => LlmReadyPolicy::BackendFlag,
        }
    }

    /// `None` when the policy's input is absent.
    pub fn evaluate(self, result: &AnalysisResult) -> Option<bool> {
        match self {
            LlmReadyPolicy::ScoreThreshold(t) => result.arc_rank().map(|s| s.round() >= f64::from(t)),
            LlmReadyPolicy::BackendFlag => result.backend_llm_ready(),
        }
    }
}

impl fmt::Display for LlmReadyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmReadyPolicy::ScoreThreshold(t) => write!(f, "threshold:{t}"),
            LlmReadyPolicy::BackendFlag => f.write_str("backend-flag"),
        }
    }
}

impl FromStr for LlmReadyPolicy {
    type Err = CoreError;

    /// `threshold`, `threshold:NN`, or `backend-flag`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "backend-flag" || s == "backend_flag" || s == "flag" {
            return Ok(LlmReadyPolicy::BackendFlag);
        }
        if s == "threshold" {
            return Ok(LlmReadyPolicy::ScoreThreshold(Self::DEFAULT_THRESHOLD));
        }
        if let Some(n) = s.strip_prefix("threshold:") {
            return match n.parse::<u8>() {
                Ok(t) if t <= 100 => Ok(LlmReadyPolicy::ScoreThreshold(t)),
                _ => Err(CoreError::ThresholdOutOfRange(n.to_string())),
            };
        }
        Err(CoreError::UnknownPolicy(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaSelect;
    use serde_json::json;

    #[test]
    fn positive_set_is_case_and_separator_insensitive() {
        for v in ["Ready", "good", "EXCELLENT", "Partially Ready", "partially_ready", " partially-ready "] {
            assert_eq!(verdict_tone(Some(v)), Tone::Positive, "{v}");
        }
        for v in ["Needs Work", "poor", "needs_improvement", "readyish", ""] {
            assert_eq!(verdict_tone(Some(v)), Tone::Negative, "{v}");
        }
    }

    #[test]
    fn absent_verdict_is_negative_placeholder() {
        let v = Verdict::from_raw(None);
        assert_eq!(v.text, PLACEHOLDER);
        assert_eq!(v.tone, Tone::Negative);
        assert_eq!(Verdict::from_raw(Some("   ")).text, PLACEHOLDER);
        assert_eq!(Verdict::from_raw(Some("Ready")).tone, Tone::Positive);
    }

    #[test]
    fn threshold_policy_reads_arc_rank() {
        let at = AnalysisResult::from_value(json!({"score_matrix": {"final_score": 60}}), SchemaSelect::Auto);
        let below = AnalysisResult::from_value(json!({"score_matrix": {"final_score": 59}}), SchemaSelect::Auto);
        let none = AnalysisResult::from_value(json!({"score_matrix": {}}), SchemaSelect::Auto);
        let p = LlmReadyPolicy::ScoreThreshold(60);
        assert_eq!(p.evaluate(&at), Some(true));
        assert_eq!(p.evaluate(&below), Some(false));
        assert_eq!(p.evaluate(&none), None);
    }

    #[test]
    fn threshold_agrees_with_the_displayed_rank() {
        let p = LlmReadyPolicy::ScoreThreshold(60);
        for (raw, ready) in [(59.6, true), (59.5, true), (59.4, false)] {
            let r = AnalysisResult::from_value(json!({"score_matrix": {"final_score": raw}}), SchemaSelect::Auto);
            let shown = crate::scores::arc_rank_text(r.arc_rank());
            assert_eq!(p.evaluate(&r), Some(ready), "{raw} shown as {shown}");
            assert_eq!(shown.parse::<u8>().unwrap() >= 60, ready);
        }
    }

    #[test]
    fn backend_flag_policy_ignores_score() {
        let b = AnalysisResult::from_value(
            json!({"evaluation": {"scores": {"overall": 9}, "llm_ready": false}}),
            SchemaSelect::Auto,
        );
        assert_eq!(LlmReadyPolicy::BackendFlag.evaluate(&b), Some(false));
        assert_eq!(LlmReadyPolicy::ScoreThreshold(60).evaluate(&b), Some(true));

        let a = AnalysisResult::from_value(json!({"score_matrix": {"final_score": 90}}), SchemaSelect::Auto);
        assert_eq!(LlmReadyPolicy::BackendFlag.evaluate(&a), None);
    }

    #[test]
    fn policy_tokens_round_trip_through_display() {
        for p in [LlmReadyPolicy::BackendFlag, LlmReadyPolicy::ScoreThreshold(70)] {
            assert_eq!(p.to_string().parse::<LlmReadyPolicy>().unwrap(), p);
        }
        assert_eq!("threshold".parse::<LlmReadyPolicy>().unwrap(), LlmReadyPolicy::ScoreThreshold(60));
        assert!("threshold:101".parse::<LlmReadyPolicy>().is_err());
        assert!("always".parse::<LlmReadyPolicy>().is_err());
    }
}
