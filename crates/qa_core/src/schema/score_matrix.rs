//! crates/qa_core/src/schema/score_matrix.rs
//! Contract A: flat `score_matrix` report with a 0–100 `final_score`.

use serde::Deserialize;

use crate::lenient;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScoreMatrixReport {
    #[serde(default, deserialize_with = "lenient::record")]
    pub page_metadata: PageMetadata,
    #[serde(default, deserialize_with = "lenient::record")]
    pub executive_summary: ExecutiveSummary,
    #[serde(default, deserialize_with = "lenient::record")]
    pub llm_interpretation: LlmInterpretation,
    #[serde(default, deserialize_with = "lenient::record")]
    pub summary_block: SummaryBlock,
    #[serde(default, deserialize_with = "lenient::record")]
    pub definitions_block: DefinitionsBlock,
    #[serde(default, deserialize_with = "lenient::record")]
    pub fanout_query_analysis: FanoutQueryAnalysis,
    #[serde(default, deserialize_with = "lenient::record")]
    pub faq_block: FaqBlock,
    #[serde(default, deserialize_with = "lenient::record")]
    pub canonical_resources_block: CanonicalResourcesBlock,
    #[serde(default, deserialize_with = "lenient::record")]
    pub content_structure: ContentStructure,
    #[serde(default, deserialize_with = "lenient::record")]
    pub clarity_readability: ClarityReadability,
    #[serde(default, deserialize_with = "lenient::record")]
    pub eeat_block: EeatBlock,
    #[serde(default, deserialize_with = "lenient::record")]
    pub score_matrix: ScoreMatrix,
    #[serde(default, deserialize_with = "lenient::record")]
    pub fix_roadmap: FixRoadmap,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageMetadata {
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub crawl_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub detected_language: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub word_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_crawled: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub llm_version: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExecutiveSummary {
    #[serde(default, deserialize_with = "lenient::number")]
    pub overall_llm_readiness_score: Option<f64>,
    /// "Ready" | "Partially Ready" | "Needs Work" | "Poor"
    #[serde(default, deserialize_with = "lenient::text")]
    pub verdict: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub main_issue: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub top_3_fixes: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LlmInterpretation {
    #[serde(default, deserialize_with = "lenient::text")]
    pub primary_topic: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub secondary_topics: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub detected_intent: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary_llm_generated: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub key_claims_llm_detected: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub confidence_level: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SummaryBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub found: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub quality: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub problems: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub recommended_summary_block: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Definition {
    #[serde(default, deserialize_with = "lenient::text")]
    pub term: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub definition: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DefinitionsBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub found: Option<bool>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub missing_critical_terms: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub quality_problems: Vec<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub recommended_definitions: Vec<Definition>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubQuestion {
    #[serde(default, deserialize_with = "lenient::text")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub matched_content: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub match_quality: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub missing_answer_note: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FanoutQueryAnalysis {
    #[serde(default, deserialize_with = "lenient::records")]
    pub sub_questions_generated: Vec<SubQuestion>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub coverage_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub main_gaps: Vec<String>,
}

/// FAQ pair as emitted by contract A (`{q, a}`).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Faq {
    #[serde(default, deserialize_with = "lenient::text")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub a: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FaqBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub found: Option<bool>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub quality_problems: Vec<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub recommended_faqs: Vec<Faq>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Resource {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CanonicalResourcesBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub found: Option<bool>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub missing_resources: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub why_it_matters: Option<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub recommended_resources: Vec<Resource>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContentStructure {
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub headings_quality: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub visual_structure: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub problems: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub recommended_structure_changes: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClarityReadability {
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub issues: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub fixes: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EeatBlock {
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub author_info_found: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub expertise_visibility: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub experience_signals: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub trust_signals: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub missing_elements: Vec<String>,
}

/// Component scores (0–10 each) and the headline `final_score` (0–100).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScoreMatrix {
    #[serde(default, deserialize_with = "lenient::number")]
    pub summary_block: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub definitions: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub faq: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub fanout_match: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub canonical_resources: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub structure: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub clarity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub eeat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub final_score: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FixRoadmap {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub immediate_fixes_next_24h: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub medium_priority_next_7_days: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub long_term_next_30_days: Vec<String>,
}

impl ScoreMatrixReport {
    /// Arc Rank on the 0–100 scale: `score_matrix.final_score`, falling back to
    /// `executive_summary.overall_llm_readiness_score`.
    pub fn arc_rank(&self) -> Option<f64> {
        self.score_matrix
            .final_score
            .or(self.executive_summary.overall_llm_readiness_score)
    }
}
