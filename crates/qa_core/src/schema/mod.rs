//! crates/qa_core/src/schema/mod.rs
//! The AnalysisResult as an explicit versioned interface.
//!
//! The backend has shipped two incompatible response contracts. Neither is
//! treated as canonical: callers either pin one (`SchemaSelect::Fixed`) or let
//! the top-level keys decide (`SchemaSelect::Auto`).

pub mod evaluation;
pub mod score_matrix;

use core::fmt;
use core::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::errors::CoreError;
use crate::lenient;

pub use evaluation::EvaluationReport;
pub use score_matrix::ScoreMatrixReport;

/// Keys that only contract A emits.
const SCORE_MATRIX_KEYS: &[&str] = &[
    "score_matrix",
    "executive_summary",
    "fanout_query_analysis",
    "fix_roadmap",
];

/// Keys that only contract B emits.
const EVALUATION_KEYS: &[&str] = &["evaluation", "llm_view", "blocks"];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaVersion {
    /// Flat `score_matrix` report, 0–100 `final_score`.
    ScoreMatrix,
    /// Nested `evaluation.scores` report, 0–10 `overall`.
    Evaluation,
}

impl SchemaVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::ScoreMatrix => "score-matrix",
            SchemaVersion::Evaluation => "evaluation",
        }
    }

    /// Detect the contract from top-level keys. Unrecognised payloads (and
    /// non-objects) are read as contract A.
    pub fn detect(value: &Value) -> SchemaVersion {
        let Some(obj) = value.as_object() else {
            return SchemaVersion::ScoreMatrix;
        };
        if SCORE_MATRIX_KEYS.iter().any(|k| obj.contains_key(*k)) {
            SchemaVersion::ScoreMatrix
        } else if EVALUATION_KEYS.iter().any(|k| obj.contains_key(*k)) {
            SchemaVersion::Evaluation
        } else {
            SchemaVersion::ScoreMatrix
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which contract to decode with.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SchemaSelect {
    #[default]
    Auto,
    Fixed(SchemaVersion),
}

impl SchemaSelect {
    pub fn resolve(self, value: &Value) -> SchemaVersion {
        match self {
            SchemaSelect::Auto => SchemaVersion::detect(value),
            SchemaSelect::Fixed(v) => v,
        }
    }
}

impl FromStr for SchemaSelect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SchemaSelect::Auto),
            "score-matrix" | "score_matrix" | "a" => Ok(SchemaSelect::Fixed(SchemaVersion::ScoreMatrix)),
            "evaluation" | "b" => Ok(SchemaSelect::Fixed(SchemaVersion::Evaluation)),
            other => Err(CoreError::UnknownSchema(other.to_string())),
        }
    }
}

/// One decoded backend response.
#[derive(Clone, Debug)]
pub enum AnalysisResult {
    ScoreMatrix(ScoreMatrixReport),
    Evaluation(EvaluationReport),
}

impl AnalysisResult {
    /// Decode a JSON value. Never fails: absent or mistyped fields are empty.
    pub fn from_value(value: Value, select: SchemaSelect) -> AnalysisResult {
        match select.resolve(&value) {
            SchemaVersion::ScoreMatrix => AnalysisResult::ScoreMatrix(lenient::record_of(value)),
            SchemaVersion::Evaluation => AnalysisResult::Evaluation(lenient::record_of(value)),
        }
    }

    pub fn schema(&self) -> SchemaVersion {
        match self {
            AnalysisResult::ScoreMatrix(_) => SchemaVersion::ScoreMatrix,
            AnalysisResult::Evaluation(_) => SchemaVersion::Evaluation,
        }
    }

    /// Headline score on the 0–100 scale.
    pub fn arc_rank(&self) -> Option<f64> {
        match self {
            AnalysisResult::ScoreMatrix(r) => r.arc_rank(),
            AnalysisResult::Evaluation(r) => r.arc_rank(),
        }
    }

    /// Raw verdict label as sent by the backend.
    pub fn verdict(&self) -> Option<&str> {
        match self {
            AnalysisResult::ScoreMatrix(r) => r.executive_summary.verdict.as_deref(),
            AnalysisResult::Evaluation(r) => r.evaluation.verdict.as_deref(),
        }
    }

    /// Backend-computed readiness flag (contract B only).
    pub fn backend_llm_ready(&self) -> Option<bool> {
        match self {
            AnalysisResult::ScoreMatrix(_) => None,
            AnalysisResult::Evaluation(r) => r.evaluation.llm_ready,
        }
    }

    /// URL the backend reports having analysed, if any.
    pub fn analyzed_url(&self) -> Option<&str> {
        match self {
            AnalysisResult::ScoreMatrix(r) => r.page_metadata.url.as_deref(),
            AnalysisResult::Evaluation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_contract_a_by_score_matrix() {
        let v = json!({ "score_matrix": { "final_score": 82 } });
        assert_eq!(SchemaVersion::detect(&v), SchemaVersion::ScoreMatrix);
        let r = AnalysisResult::from_value(v, SchemaSelect::Auto);
        assert_eq!(r.arc_rank(), Some(82.0));
    }

    #[test]
    fn detects_contract_b_by_evaluation() {
        let v = json!({ "evaluation": { "scores": { "overall": 7.5 }, "llm_ready": true } });
        let r = AnalysisResult::from_value(v, SchemaSelect::Auto);
        assert_eq!(r.schema(), SchemaVersion::Evaluation);
        assert_eq!(r.arc_rank(), Some(75.0));
        assert_eq!(r.backend_llm_ready(), Some(true));
    }

    #[test]
    fn unknown_and_non_object_payloads_read_as_contract_a() {
        assert_eq!(SchemaVersion::detect(&json!({})), SchemaVersion::ScoreMatrix);
        let r = AnalysisResult::from_value(json!([1, 2]), SchemaSelect::Auto);
        assert_eq!(r.schema(), SchemaVersion::ScoreMatrix);
        assert_eq!(r.arc_rank(), None);
        assert_eq!(r.verdict(), None);
    }

    #[test]
    fn fixed_select_overrides_detection() {
        let v = json!({ "score_matrix": { "final_score": 82 } });
        let r = AnalysisResult::from_value(v, SchemaSelect::Fixed(SchemaVersion::Evaluation));
        assert_eq!(r.schema(), SchemaVersion::Evaluation);
        assert_eq!(r.arc_rank(), None);
    }

    #[test]
    fn arc_rank_falls_back_to_executive_summary() {
        let v = json!({ "executive_summary": { "overall_llm_readiness_score": 64 } });
        let r = AnalysisResult::from_value(v, SchemaSelect::Auto);
        assert_eq!(r.arc_rank(), Some(64.0));
    }

    #[test]
    fn mistyped_nested_blocks_do_not_fail() {
        let v = json!({
            "score_matrix": "broken",
            "faq_block": { "score": "high", "recommended_faqs": [ "x", { "q": "Why?", "a": 3 } ] },
            "fix_roadmap": null
        });
        let AnalysisResult::ScoreMatrix(r) = AnalysisResult::from_value(v, SchemaSelect::Auto) else {
            panic!("expected contract A");
        };
        assert_eq!(r.score_matrix.final_score, None);
        assert_eq!(r.faq_block.score, None);
        assert_eq!(r.faq_block.recommended_faqs.len(), 1);
        assert_eq!(r.faq_block.recommended_faqs[0].q.as_deref(), Some("Why?"));
        assert_eq!(r.faq_block.recommended_faqs[0].a, None);
        assert!(r.fix_roadmap.immediate_fixes_next_24h.is_empty());
    }

    #[test]
    fn schema_select_parses_tokens() {
        assert_eq!("auto".parse::<SchemaSelect>().unwrap(), SchemaSelect::Auto);
        assert_eq!(
            "Score-Matrix".parse::<SchemaSelect>().unwrap(),
            SchemaSelect::Fixed(SchemaVersion::ScoreMatrix)
        );
        assert!("v3".parse::<SchemaSelect>().is_err());
    }
}
