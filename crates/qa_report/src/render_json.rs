//! render_json.rs: report JSON renderer.
//! Field order follows struct layout: `meta` first, then `regions` in
//! display order, each as `{"region": "<name>", "view": {...}}`.

use serde_json::Value;

use crate::{ReportError, ReportModel};

pub fn report_value(model: &ReportModel) -> Result<Value, ReportError> {
    serde_json::to_value(model).map_err(|e| ReportError::Json(e.to_string()))
}

/// Pretty JSON with a trailing newline.
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    let mut s =
        serde_json::to_string_pretty(model).map_err(|e| ReportError::Json(e.to_string()))?;
    s.push('\n');
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_report;
    use assert_json_diff::assert_json_include;
    use qa_core::{AnalysisResult, SchemaSelect};
    use serde_json::json;

    #[test]
    fn header_region_shape() {
        let r = AnalysisResult::from_value(
            json!({
                "score_matrix": { "final_score": 82 },
                "executive_summary": { "verdict": "Ready" },
                "clarity_readability": { "score": 7.3 }
            }),
            SchemaSelect::Auto,
        );
        let v = report_value(&build_report(&r, None, None, Some("sha256:ff"))).unwrap();
        assert_json_include!(
            actual: v,
            expected: json!({
                "meta": {
                    "schema": "score-matrix",
                    "llm_ready_policy": "threshold:60",
                    "response_digest": "sha256:ff"
                },
                "regions": [{
                    "region": "score_header",
                    "view": {
                        "arc_rank": "82",
                        "verdict": { "text": "Ready", "tone": "positive" },
                        "llm_ready": { "ready": true, "text": "Yes" },
                        "sub_scores": [{ "label": "AIO", "text": "7.3", "width_css": "73%" }]
                    }
                }]
            })
        );
    }

    #[test]
    fn render_is_pretty_with_newline() {
        let r = AnalysisResult::from_value(json!({}), SchemaSelect::Auto);
        let s = render_json(&build_report(&r, None, None, None)).unwrap();
        assert!(s.ends_with("}\n"));
        assert!(s.starts_with("{\n  \"meta\""));
        assert!(!s.contains("NaN"));
    }
}
