//! qa_report/src/lib.rs: Pure report model + renderers (JSON/HTML).
//!
//! Rules:
//! - No network, no file I/O. Callers hand in an already-decoded result.
//! - Region models hold plain text; only `render_html` emits markup, and it
//!   escapes every interpolated value.
//! - Stable region order (`Region::ALL`) and field names.

#![deny(unsafe_code)]

use serde::Serialize;
use thiserror::Error;

use qa_core::{AnalysisResult, LlmReadyPolicy, SchemaVersion};

pub mod structure;

#[cfg(feature = "render_html")]
pub mod render_html;

#[cfg(feature = "render_json")]
pub mod render_json;

pub use structure::{build_region, build_regions, Region, RegionView};

// ===== Errors =====
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template error: {0}")]
    Template(String),
    #[error("json serialize error: {0}")]
    Json(String),
}

// ===== Model =====

/// Provenance shown in the report footer and the JSON header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportMeta {
    /// URL the user submitted (absent for offline renders of a saved body).
    pub requested_url: Option<String>,
    /// URL the backend says it analysed (contract A `page_metadata.url`).
    pub analyzed_url: Option<String>,
    pub schema: SchemaVersion,
    pub llm_ready_policy: String,
    /// `sha256:<hex>` of the raw response body.
    pub response_digest: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportModel {
    pub meta: ReportMeta,
    pub regions: Vec<RegionView>,
}

impl ReportModel {
    /// `contract · policy · digest` provenance line; needs a digest.
    pub fn footer_line(&self) -> Option<String> {
        let digest = self.meta.response_digest.as_deref()?;
        Some(format!(
            "Contract: {} · LLM-ready policy: {} · Response {}",
            self.meta.schema, self.meta.llm_ready_policy, digest
        ))
    }
}

/// Policy to use when the integration did not pick one.
pub fn effective_policy(policy: Option<LlmReadyPolicy>, result: &AnalysisResult) -> LlmReadyPolicy {
    policy.unwrap_or_else(|| LlmReadyPolicy::native_for(result.schema()))
}

/// Build the full report model (all regions the contract supports).
pub fn build_report(
    result: &AnalysisResult,
    policy: Option<LlmReadyPolicy>,
    requested_url: Option<&str>,
    response_digest: Option<&str>,
) -> ReportModel {
    let policy = effective_policy(policy, result);
    ReportModel {
        meta: ReportMeta {
            requested_url: requested_url.map(str::to_string),
            analyzed_url: result.analyzed_url().map(str::to_string),
            schema: result.schema(),
            llm_ready_policy: policy.to_string(),
            response_digest: response_digest.map(str::to_string),
        },
        regions: build_regions(result, policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_core::SchemaSelect;
    use serde_json::json;

    #[test]
    fn native_policy_follows_the_contract() {
        let a = AnalysisResult::from_value(json!({ "score_matrix": {} }), SchemaSelect::Auto);
        let b = AnalysisResult::from_value(json!({ "evaluation": {} }), SchemaSelect::Auto);
        assert_eq!(build_report(&a, None, None, None).meta.llm_ready_policy, "threshold:60");
        assert_eq!(build_report(&b, None, None, None).meta.llm_ready_policy, "backend-flag");
        let pinned = build_report(&b, Some(LlmReadyPolicy::ScoreThreshold(75)), None, None);
        assert_eq!(pinned.meta.llm_ready_policy, "threshold:75");
    }

    #[test]
    fn regions_come_out_in_display_order() {
        let a = AnalysisResult::from_value(json!({}), SchemaSelect::Auto);
        let model = build_report(&a, None, Some("https://example.com"), Some("sha256:00"));
        let order: Vec<Region> = model.regions.iter().map(RegionView::region).collect();
        assert_eq!(order, Region::ALL.to_vec());
        assert_eq!(model.meta.requested_url.as_deref(), Some("https://example.com"));
    }
}
