//! crates/qa_report/src/structure.rs
//! Region view models + pure builders from a decoded `AnalysisResult`.
//! No I/O, no markup. Every string is plain text; escaping is the HTML
//! adapter's job. Missing substructures degrade to `—` or an empty-state text.

use serde::Serialize;

use qa_core::policy::{LlmReadyPolicy, Verdict};
use qa_core::schema::evaluation::EvaluationReport;
use qa_core::schema::score_matrix::ScoreMatrixReport;
use qa_core::scores::{self, PLACEHOLDER};
use qa_core::AnalysisResult;

// -------------------- empty-state texts --------------------

pub const EMPTY_SUMMARY: &str = "No summary generated.";
pub const EMPTY_DEFINITIONS: &str = "No definitions generated.";
pub const EMPTY_FAQ: &str = "No FAQ suggestions generated.";
pub const EMPTY_RESOURCES: &str = "No canonical resources suggested.";
pub const EMPTY_ROADMAP: &str = "Nothing scheduled.";

// -------------------- regions --------------------

/// Fixed visual regions, in display order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    ScoreHeader,
    Interpretation,
    Evaluation,
    Summary,
    Definitions,
    Faq,
    Resources,
    Roadmap,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::ScoreHeader,
        Region::Interpretation,
        Region::Evaluation,
        Region::Summary,
        Region::Definitions,
        Region::Faq,
        Region::Resources,
        Region::Roadmap,
    ];

    /// Id of the page container this region is written into.
    pub fn container_id(self) -> &'static str {
        match self {
            Region::ScoreHeader => "score-header",
            Region::Interpretation => "llm-interpretation",
            Region::Evaluation => "evaluation",
            Region::Summary => "summary-block",
            Region::Definitions => "definitions-block",
            Region::Faq => "faq-block",
            Region::Resources => "canonical-resources",
            Region::Roadmap => "fix-roadmap",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Region::ScoreHeader => "Arc Rank",
            Region::Interpretation => "How an LLM reads this page",
            Region::Evaluation => "Evaluation",
            Region::Summary => "Summary block",
            Region::Definitions => "Definitions",
            Region::Faq => "FAQ",
            Region::Resources => "Canonical resources",
            Region::Roadmap => "Fix roadmap",
        }
    }
}

/// One built region. Serialized as `{"region": "...", "view": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "region", content = "view", rename_all = "snake_case")]
pub enum RegionView {
    ScoreHeader(ScoreHeader),
    Interpretation(InterpretationCard),
    Evaluation(EvaluationCard),
    Summary(SummaryView),
    Definitions(DefinitionsView),
    Faq(FaqView),
    Resources(ResourcesView),
    Roadmap(RoadmapView),
}

impl RegionView {
    pub fn region(&self) -> Region {
        match self {
            RegionView::ScoreHeader(_) => Region::ScoreHeader,
            RegionView::Interpretation(_) => Region::Interpretation,
            RegionView::Evaluation(_) => Region::Evaluation,
            RegionView::Summary(_) => Region::Summary,
            RegionView::Definitions(_) => Region::Definitions,
            RegionView::Faq(_) => Region::Faq,
            RegionView::Resources(_) => Region::Resources,
            RegionView::Roadmap(_) => Region::Roadmap,
        }
    }
}

// -------------------- shared pieces --------------------

/// A 0–10 score rendered as text plus a bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreBar {
    pub label: String,
    /// Shortest decimal form of the score, or `—`.
    pub text: String,
    /// `clamp(score, 0, 10) * 10`; 0 when absent.
    pub width_pct: f64,
    /// CSS width token, e.g. `73%`.
    pub width_css: String,
}

impl ScoreBar {
    pub fn new(label: &str, score: Option<f64>) -> Self {
        let width_pct = scores::bar_width_pct(score);
        ScoreBar {
            label: label.to_string(),
            text: scores::sub_score_text(score),
            width_pct,
            width_css: scores::css_percent(width_pct),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

impl Fact {
    /// Always shown; absent values read `—`.
    fn shown(label: &str, value: Option<&str>) -> Fact {
        Fact { label: label.to_string(), value: text_or_placeholder(value) }
    }

    /// Shown only when the value is present.
    fn optional(label: &str, value: Option<String>) -> Option<Fact> {
        value.map(|value| Fact { label: label.to_string(), value })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ListSection {
    pub label: String,
    pub items: Vec<String>,
}

/// LLM-ready badge as decided by the configured policy.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReadyBadge {
    pub ready: Option<bool>,
    /// `Yes` / `No` / `—`.
    pub text: String,
    pub policy: String,
}

impl ReadyBadge {
    pub fn css_class(&self) -> &'static str {
        match self.ready {
            Some(true) => "ready-yes",
            Some(false) => "ready-no",
            None => "ready-unknown",
        }
    }
}

// -------------------- region models --------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreHeader {
    /// Arc Rank as a rounded integer on 0–100, or `—`.
    pub arc_rank: String,
    pub verdict: Verdict,
    pub llm_ready: ReadyBadge,
    /// AIO, AEO, GEO.
    pub sub_scores: Vec<ScoreBar>,
    pub main_issue: Option<String>,
    /// Page metadata reported by the backend (contract A).
    pub page: Vec<Fact>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InterpretationCard {
    pub facts: Vec<Fact>,
    pub generated_summary: Option<String>,
    pub lists: Vec<ListSection>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SubQuestionRow {
    pub question: String,
    pub match_quality: String,
    pub matched_content: Option<String>,
    pub missing_answer_note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationCard {
    pub verdict: Verdict,
    pub bars: Vec<ScoreBar>,
    pub notes: Vec<Fact>,
    pub lists: Vec<ListSection>,
    pub sub_questions: Vec<SubQuestionRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryView {
    pub score: Option<ScoreBar>,
    pub found: Option<bool>,
    pub quality: Option<String>,
    pub text: Option<String>,
    pub facts: Vec<Fact>,
    pub key_points: Vec<String>,
    pub problems: Vec<String>,
    pub placeholder: Option<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DefinitionRow {
    pub term: String,
    pub definition: String,
    pub context: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DefinitionsView {
    pub score: Option<ScoreBar>,
    pub found: Option<bool>,
    pub rows: Vec<DefinitionRow>,
    pub missing_terms: Vec<String>,
    pub problems: Vec<String>,
    pub placeholder: Option<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FaqRow {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaqView {
    pub score: Option<ScoreBar>,
    pub found: Option<bool>,
    pub rows: Vec<FaqRow>,
    pub problems: Vec<String>,
    pub placeholder: Option<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResourceRow {
    pub title: String,
    /// Raw URL as sent; the HTML adapter decides whether it becomes a link.
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourcesView {
    pub score: Option<ScoreBar>,
    pub found: Option<bool>,
    pub rows: Vec<ResourceRow>,
    pub why_it_matters: Option<String>,
    pub missing: Vec<String>,
    pub placeholder: Option<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoadmapColumn {
    pub label: String,
    pub items: Vec<String>,
    pub placeholder: Option<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoadmapView {
    pub columns: Vec<RoadmapColumn>,
}

// -------------------- builders --------------------

/// Build every region the result's contract supports, in display order.
pub fn build_regions(result: &AnalysisResult, policy: LlmReadyPolicy) -> Vec<RegionView> {
    Region::ALL
        .iter()
        .filter_map(|r| build_region(*r, result, policy))
        .collect()
}

/// `None` only for regions the contract has no data for (roadmap on B).
pub fn build_region(
    region: Region,
    result: &AnalysisResult,
    policy: LlmReadyPolicy,
) -> Option<RegionView> {
    let view = match region {
        Region::ScoreHeader => RegionView::ScoreHeader(score_header(result, policy)),
        Region::Interpretation => RegionView::Interpretation(interpretation(result)),
        Region::Evaluation => RegionView::Evaluation(evaluation(result)),
        Region::Summary => RegionView::Summary(summary(result)),
        Region::Definitions => RegionView::Definitions(definitions(result)),
        Region::Faq => RegionView::Faq(faq(result)),
        Region::Resources => RegionView::Resources(resources(result)),
        Region::Roadmap => RegionView::Roadmap(roadmap(result)?),
    };
    Some(view)
}

pub fn score_header(result: &AnalysisResult, policy: LlmReadyPolicy) -> ScoreHeader {
    let ready = policy.evaluate(result);
    let llm_ready = ReadyBadge { ready, text: yes_no(ready), policy: policy.to_string() };
    let arc_rank = scores::arc_rank_text(result.arc_rank());
    let verdict = Verdict::from_raw(result.verdict());

    match result {
        AnalysisResult::ScoreMatrix(r) => {
            let m = &r.page_metadata;
            let page = [
                Fact::optional("URL", non_blank(&m.url)),
                Fact::optional("Crawl status", non_blank(&m.crawl_status)),
                Fact::optional("Language", non_blank(&m.detected_language)),
                Fact::optional("Content type", non_blank(&m.content_type)),
                Fact::optional("Word count", m.word_count.map(|n| scores::count_text(Some(n)))),
                Fact::optional("Last crawled", non_blank(&m.last_crawled)),
                Fact::optional("Model", non_blank(&m.llm_version)),
            ]
            .into_iter()
            .flatten()
            .collect();
            ScoreHeader {
                arc_rank,
                verdict,
                llm_ready,
                sub_scores: vec![
                    ScoreBar::new("AIO", r.clarity_readability.score),
                    ScoreBar::new("AEO", r.faq_block.score),
                    ScoreBar::new("GEO", r.fanout_query_analysis.coverage_score),
                ],
                main_issue: non_blank(&r.executive_summary.main_issue),
                page,
            }
        }
        AnalysisResult::Evaluation(r) => {
            let s = &r.evaluation.scores;
            ScoreHeader {
                arc_rank,
                verdict,
                llm_ready,
                sub_scores: vec![
                    ScoreBar::new("AIO", s.structure),
                    ScoreBar::new("AEO", s.answerability),
                    ScoreBar::new("GEO", s.coverage),
                ],
                main_issue: r.evaluation.priority_fixes.first().cloned(),
                page: Vec::new(),
            }
        }
    }
}

pub fn interpretation(result: &AnalysisResult) -> InterpretationCard {
    match result {
        AnalysisResult::ScoreMatrix(r) => {
            let li = &r.llm_interpretation;
            InterpretationCard {
                facts: vec![
                    Fact::shown("Primary topic", li.primary_topic.as_deref()),
                    Fact::shown("Detected intent", li.detected_intent.as_deref()),
                    Fact::shown("Confidence", li.confidence_level.as_deref()),
                ],
                generated_summary: non_blank(&li.summary_llm_generated),
                lists: lists([
                    ("Secondary topics", &li.secondary_topics),
                    ("Key claims", &li.key_claims_llm_detected),
                ]),
            }
        }
        AnalysisResult::Evaluation(r) => {
            let v = &r.llm_view;
            InterpretationCard {
                facts: vec![
                    Fact::shown("Primary topic", v.primary_topic.as_deref()),
                    Fact::shown("Primary intent", v.primary_intent.as_deref()),
                    Fact::shown("Audience", v.audience.as_deref()),
                ],
                generated_summary: None,
                lists: lists([
                    ("Questions answered", &v.user_questions_answered),
                    ("Questions missing", &v.user_questions_missing),
                    ("Key facts", &v.key_facts),
                    ("Important entities", &v.important_entities),
                ]),
            }
        }
    }
}

pub fn evaluation(result: &AnalysisResult) -> EvaluationCard {
    let verdict = Verdict::from_raw(result.verdict());
    match result {
        AnalysisResult::ScoreMatrix(r) => evaluation_a(r, verdict),
        AnalysisResult::Evaluation(r) => evaluation_b(r, verdict),
    }
}

fn evaluation_a(r: &ScoreMatrixReport, verdict: Verdict) -> EvaluationCard {
    let m = &r.score_matrix;
    let cs = &r.content_structure;
    let eeat = &r.eeat_block;
    let notes = [
        Fact::optional("Headings", non_blank(&cs.headings_quality)),
        Fact::optional("Visual structure", non_blank(&cs.visual_structure)),
        Fact::optional("Author info found", eeat.author_info_found.map(|b| yes_no(Some(b)))),
        Fact::optional("Expertise", non_blank(&eeat.expertise_visibility)),
        Fact::optional("Experience", non_blank(&eeat.experience_signals)),
        Fact::optional("Trust", non_blank(&eeat.trust_signals)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let sub_questions = r
        .fanout_query_analysis
        .sub_questions_generated
        .iter()
        .filter(|q| q.question.as_deref().is_some_and(|s| !s.trim().is_empty()))
        .map(|q| SubQuestionRow {
            question: text_or_placeholder(q.question.as_deref()),
            match_quality: text_or_placeholder(q.match_quality.as_deref()),
            matched_content: non_blank(&q.matched_content),
            missing_answer_note: non_blank(&q.missing_answer_note),
        })
        .collect();

    EvaluationCard {
        verdict,
        bars: vec![
            ScoreBar::new("Summary", m.summary_block),
            ScoreBar::new("Definitions", m.definitions),
            ScoreBar::new("FAQ", m.faq),
            ScoreBar::new("Fan-out match", m.fanout_match),
            ScoreBar::new("Canonical resources", m.canonical_resources),
            ScoreBar::new("Structure", m.structure),
            ScoreBar::new("Clarity", m.clarity),
            ScoreBar::new("E-E-A-T", m.eeat),
        ],
        notes,
        lists: lists([
            ("Top fixes", &r.executive_summary.top_3_fixes),
            ("Structure problems", &cs.problems),
            ("Structure changes", &cs.recommended_structure_changes),
            ("Clarity issues", &r.clarity_readability.issues),
            ("Clarity fixes", &r.clarity_readability.fixes),
            ("Fan-out gaps", &r.fanout_query_analysis.main_gaps),
            ("Missing E-E-A-T elements", &eeat.missing_elements),
        ]),
        sub_questions,
    }
}

fn evaluation_b(r: &EvaluationReport, verdict: Verdict) -> EvaluationCard {
    let e = &r.evaluation;
    let s = &e.scores;
    EvaluationCard {
        verdict,
        bars: vec![
            ScoreBar::new("Intent clarity", s.intent_clarity),
            ScoreBar::new("Coverage", s.coverage),
            ScoreBar::new("Structure", s.structure),
            ScoreBar::new("Definitions", s.definitions),
            ScoreBar::new("Answerability", s.answerability),
            ScoreBar::new("Trust", s.trust),
            ScoreBar::new("Overall", s.overall),
            ScoreBar::new("Canonical", e.canonical_score),
        ],
        notes: Vec::new(),
        lists: lists([
            ("Issues", &e.issues),
            ("Recommendations", &e.recommendations),
            ("Priority fixes", &e.priority_fixes),
            ("Canonical issues", &e.canonical_issues),
            ("Canonical recommendations", &e.canonical_recommendations),
        ]),
        sub_questions: Vec::new(),
    }
}

pub fn summary(result: &AnalysisResult) -> SummaryView {
    match result {
        AnalysisResult::ScoreMatrix(r) => {
            let b = &r.summary_block;
            let text = non_blank(&b.recommended_summary_block);
            SummaryView {
                score: Some(ScoreBar::new("Score", b.score)),
                found: b.found,
                quality: non_blank(&b.quality),
                placeholder: text.is_none().then_some(EMPTY_SUMMARY),
                text,
                facts: Vec::new(),
                key_points: Vec::new(),
                problems: b.problems.clone(),
            }
        }
        AnalysisResult::Evaluation(r) => {
            let b = &r.blocks.summary_block;
            let facts: Vec<Fact> = [
                Fact::optional("Purpose", non_blank(&b.purpose)),
                Fact::optional("Audience", non_blank(&b.audience)),
            ]
            .into_iter()
            .flatten()
            .collect();
            let empty = facts.is_empty() && b.key_points.is_empty();
            SummaryView {
                score: None,
                found: None,
                quality: None,
                text: None,
                facts,
                key_points: b.key_points.clone(),
                problems: Vec::new(),
                placeholder: empty.then_some(EMPTY_SUMMARY),
            }
        }
    }
}

pub fn definitions(result: &AnalysisResult) -> DefinitionsView {
    let (score, found, rows, missing_terms, problems) = match result {
        AnalysisResult::ScoreMatrix(r) => {
            let b = &r.definitions_block;
            let rows: Vec<DefinitionRow> = b
                .recommended_definitions
                .iter()
                .filter_map(|d| definition_row(d.term.as_deref(), d.definition.as_deref(), None))
                .collect();
            (
                Some(ScoreBar::new("Score", b.score)),
                b.found,
                rows,
                b.missing_critical_terms.clone(),
                b.quality_problems.clone(),
            )
        }
        AnalysisResult::Evaluation(r) => {
            let rows: Vec<DefinitionRow> = r
                .blocks
                .definitions_block
                .iter()
                .filter_map(|d| {
                    definition_row(d.term.as_deref(), d.definition.as_deref(), d.context.as_deref())
                })
                .collect();
            (None, None, rows, Vec::new(), Vec::new())
        }
    };
    let placeholder = rows.is_empty().then_some(EMPTY_DEFINITIONS);
    DefinitionsView { score, found, rows, missing_terms, problems, placeholder }
}

pub fn faq(result: &AnalysisResult) -> FaqView {
    let (score, found, rows, problems) = match result {
        AnalysisResult::ScoreMatrix(r) => {
            let b = &r.faq_block;
            let rows: Vec<FaqRow> = b
                .recommended_faqs
                .iter()
                .filter_map(|f| faq_row(f.q.as_deref(), f.a.as_deref()))
                .collect();
            (Some(ScoreBar::new("Score", b.score)), b.found, rows, b.quality_problems.clone())
        }
        AnalysisResult::Evaluation(r) => {
            let rows: Vec<FaqRow> = r
                .blocks
                .faq_block
                .iter()
                .filter_map(|f| faq_row(f.question.as_deref(), f.answer.as_deref()))
                .collect();
            (None, None, rows, Vec::new())
        }
    };
    let placeholder = rows.is_empty().then_some(EMPTY_FAQ);
    FaqView { score, found, rows, problems, placeholder }
}

pub fn resources(result: &AnalysisResult) -> ResourcesView {
    let (score, found, rows, why_it_matters, missing) = match result {
        AnalysisResult::ScoreMatrix(r) => {
            let b = &r.canonical_resources_block;
            let rows: Vec<ResourceRow> = b
                .recommended_resources
                .iter()
                .filter_map(|x| resource_row(x.title.as_deref(), x.url.as_deref()))
                .collect();
            (
                Some(ScoreBar::new("Score", b.score)),
                b.found,
                rows,
                non_blank(&b.why_it_matters),
                b.missing_resources.clone(),
            )
        }
        AnalysisResult::Evaluation(r) => {
            let rows: Vec<ResourceRow> = r
                .blocks
                .canonical_resources
                .iter()
                .filter_map(|x| resource_row(x.title.as_deref(), x.url.as_deref()))
                .collect();
            (None, None, rows, None, Vec::new())
        }
    };
    let placeholder = rows.is_empty().then_some(EMPTY_RESOURCES);
    ResourcesView { score, found, rows, why_it_matters, missing, placeholder }
}

/// Contract A only.
pub fn roadmap(result: &AnalysisResult) -> Option<RoadmapView> {
    let AnalysisResult::ScoreMatrix(r) = result else {
        return None;
    };
    let f = &r.fix_roadmap;
    let column = |label: &str, items: &[String]| RoadmapColumn {
        label: label.to_string(),
        items: items.to_vec(),
        placeholder: items.is_empty().then_some(EMPTY_ROADMAP),
    };
    Some(RoadmapView {
        columns: vec![
            column("Next 24 hours", &f.immediate_fixes_next_24h),
            column("Next 7 days", &f.medium_priority_next_7_days),
            column("Next 30 days", &f.long_term_next_30_days),
        ],
    })
}

// -------------------- helpers --------------------

pub fn yes_no(v: Option<bool>) -> String {
    match v {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn text_or_placeholder(v: Option<&str>) -> String {
    match v.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn lists<const N: usize>(sections: [(&str, &Vec<String>); N]) -> Vec<ListSection> {
    sections
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(label, items)| ListSection { label: label.to_string(), items: items.clone() })
        .collect()
}

fn definition_row(term: Option<&str>, def: Option<&str>, ctx: Option<&str>) -> Option<DefinitionRow> {
    if blank(term) && blank(def) {
        return None;
    }
    Some(DefinitionRow {
        term: text_or_placeholder(term),
        definition: text_or_placeholder(def),
        context: ctx.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string),
    })
}

fn faq_row(q: Option<&str>, a: Option<&str>) -> Option<FaqRow> {
    if blank(q) && blank(a) {
        return None;
    }
    Some(FaqRow { question: text_or_placeholder(q), answer: text_or_placeholder(a) })
}

fn resource_row(title: Option<&str>, url: Option<&str>) -> Option<ResourceRow> {
    let url = url.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    if blank(title) && url.is_none() {
        return None;
    }
    let title = match title.map(str::trim).filter(|s| !s.is_empty()) {
        Some(t) => t.to_string(),
        None => url.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
    };
    Some(ResourceRow { title, url })
}

fn blank(v: Option<&str>) -> bool {
    v.map_or(true, |s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_core::{SchemaSelect, Tone};
    use serde_json::json;

    fn decode(v: serde_json::Value) -> AnalysisResult {
        AnalysisResult::from_value(v, SchemaSelect::Auto)
    }

    #[test]
    fn end_to_end_contract_a_header_and_faq() {
        let r = decode(json!({
            "score_matrix": { "final_score": 82 },
            "clarity_readability": { "score": 7.3 },
            "faq_block": { "recommended_faqs": [] }
        }));
        let h = score_header(&r, LlmReadyPolicy::native_for(r.schema()));
        assert_eq!(h.arc_rank, "82");
        assert_eq!(h.sub_scores[0].label, "AIO");
        assert_eq!(h.sub_scores[0].text, "7.3");
        assert_eq!(h.sub_scores[0].width_css, "73%");
        assert_eq!(h.llm_ready.text, "Yes");

        let f = faq(&r);
        assert!(f.rows.is_empty());
        assert_eq!(f.placeholder, Some(EMPTY_FAQ));
    }

    #[test]
    fn empty_document_renders_placeholders_everywhere() {
        let r = decode(json!({}));
        let h = score_header(&r, LlmReadyPolicy::ScoreThreshold(60));
        assert_eq!(h.arc_rank, PLACEHOLDER);
        assert_eq!(h.verdict.text, PLACEHOLDER);
        assert_eq!(h.verdict.tone, Tone::Negative);
        assert_eq!(h.llm_ready.ready, None);
        for bar in &h.sub_scores {
            assert_eq!(bar.text, PLACEHOLDER);
            assert_eq!(bar.width_pct, 0.0);
            assert!(!bar.width_css.contains("NaN"));
        }
        assert_eq!(summary(&r).placeholder, Some(EMPTY_SUMMARY));
        assert_eq!(definitions(&r).placeholder, Some(EMPTY_DEFINITIONS));
        assert_eq!(resources(&r).placeholder, Some(EMPTY_RESOURCES));
        let roadmap = roadmap(&r).unwrap();
        assert!(roadmap.columns.iter().all(|c| c.placeholder == Some(EMPTY_ROADMAP)));
    }

    #[test]
    fn contract_b_maps_sub_scores_and_backend_flag() {
        let r = decode(json!({
            "evaluation": {
                "scores": { "structure": 4, "answerability": 9.5, "coverage": 12, "overall": 7 },
                "verdict": "needs_improvement",
                "llm_ready": false
            }
        }));
        let h = score_header(&r, LlmReadyPolicy::native_for(r.schema()));
        assert_eq!(h.arc_rank, "70");
        let widths: Vec<_> = h.sub_scores.iter().map(|b| b.width_css.as_str()).collect();
        assert_eq!(widths, ["40%", "95%", "100%"]);
        assert_eq!(h.verdict.tone, Tone::Negative);
        assert_eq!(h.llm_ready.text, "No");
        assert_eq!(h.llm_ready.policy, "backend-flag");

        // Threshold policy on the same document disagrees with the backend flag.
        let h = score_header(&r, LlmReadyPolicy::ScoreThreshold(60));
        assert_eq!(h.llm_ready.ready, Some(true));
    }

    #[test]
    fn roadmap_is_contract_a_only() {
        let b = decode(json!({ "llm_view": {} }));
        assert!(roadmap(&b).is_none());
        let regions: Vec<_> = build_regions(&b, LlmReadyPolicy::BackendFlag)
            .iter()
            .map(RegionView::region)
            .collect();
        assert!(!regions.contains(&Region::Roadmap));
        assert_eq!(regions.len(), Region::ALL.len() - 1);
    }

    #[test]
    fn rows_skip_empty_records_and_fill_gaps() {
        let r = decode(json!({
            "executive_summary": {},
            "definitions_block": { "recommended_definitions": [
                { "term": "Arc Rank" },
                {},
                { "term": " ", "definition": "" }
            ]},
            "canonical_resources_block": { "recommended_resources": [
                { "url": "https://example.com/guide" },
                { "title": "No link" }
            ]}
        }));
        let d = definitions(&r);
        assert_eq!(d.rows.len(), 1);
        assert_eq!(d.rows[0].definition, PLACEHOLDER);
        assert_eq!(d.placeholder, None);

        let res = resources(&r);
        assert_eq!(res.rows[0].title, "https://example.com/guide");
        assert_eq!(res.rows[1].url, None);
    }

    #[test]
    fn contract_b_blocks_fill_summary_and_faq() {
        let r = decode(json!({
            "blocks": {
                "summary_block": { "purpose": "Explain pricing", "key_points": ["a", "b"] },
                "faq_block": [{ "question": "Why?", "answer": "Because." }],
                "definitions_block": [{ "term": "AEO", "definition": "Answer engine optimisation", "context": "search" }]
            }
        }));
        let s = summary(&r);
        assert_eq!(s.placeholder, None);
        assert_eq!(s.facts[0].value, "Explain pricing");
        assert_eq!(s.key_points.len(), 2);
        assert_eq!(faq(&r).rows[0].answer, "Because.");
        assert_eq!(definitions(&r).rows[0].context.as_deref(), Some("search"));
    }

    #[test]
    fn positive_verdicts_get_positive_tone() {
        for v in ["Ready", "good", "EXCELLENT", "Partially Ready", "partially_ready"] {
            let r = decode(json!({ "executive_summary": { "verdict": v } }));
            assert_eq!(evaluation(&r).verdict.tone, Tone::Positive, "{v}");
        }
        let r = decode(json!({ "executive_summary": { "verdict": "Poor" } }));
        assert_eq!(evaluation(&r).verdict.tone, Tone::Negative);
    }
}
