//! crates/qa_core/src/schema/evaluation.rs
//! Contract B: nested `evaluation.scores` report with a 0–10 `overall` score
//! and a backend-computed `llm_ready` flag.

use serde::Deserialize;

use crate::lenient;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EvaluationReport {
    #[serde(default, deserialize_with = "lenient::record")]
    pub llm_view: LlmView,
    #[serde(default, deserialize_with = "lenient::record")]
    pub evaluation: Evaluation,
    #[serde(default, deserialize_with = "lenient::record")]
    pub blocks: Blocks,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LlmView {
    #[serde(default, deserialize_with = "lenient::text")]
    pub primary_topic: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub primary_intent: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub audience: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub user_questions_answered: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub user_questions_missing: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub key_facts: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub important_entities: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Scores {
    #[serde(default, deserialize_with = "lenient::number")]
    pub intent_clarity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub coverage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub structure: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub definitions: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub answerability: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub trust: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub overall: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Evaluation {
    #[serde(default, deserialize_with = "lenient::record")]
    pub scores: Scores,
    /// "excellent" | "good" | "needs_improvement" | "poor"
    #[serde(default, deserialize_with = "lenient::text")]
    pub verdict: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub issues: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub priority_fixes: Vec<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub canonical_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub canonical_issues: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub canonical_recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub llm_ready: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SummaryBlock {
    #[serde(default, deserialize_with = "lenient::text")]
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub audience: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub key_points: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Definition {
    #[serde(default, deserialize_with = "lenient::text")]
    pub term: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub definition: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub context: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Faq {
    #[serde(default, deserialize_with = "lenient::text")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub answer: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Resource {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Blocks {
    #[serde(default, deserialize_with = "lenient::record")]
    pub summary_block: SummaryBlock,
    #[serde(default, deserialize_with = "lenient::records")]
    pub definitions_block: Vec<Definition>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub faq_block: Vec<Faq>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub canonical_resources: Vec<Resource>,
}

impl EvaluationReport {
    /// Arc Rank on the 0–100 scale: `evaluation.scores.overall × 10`.
    pub fn arc_rank(&self) -> Option<f64> {
        self.evaluation.scores.overall.map(|v| v * 10.0)
    }
}
