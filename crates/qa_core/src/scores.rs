//! crates/qa_core/src/scores.rs
//! Score text and bar geometry. Never produces "NaN".

/// Shown wherever a value is absent.
pub const PLACEHOLDER: &str = "—";

/// Upper bound of a sub-score.
pub const SUB_SCORE_MAX: f64 = 10.0;

/// Clamp a 0–10 sub-score. Non-finite input clamps to 0.
#[inline]
pub fn clamp_sub_score(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, SUB_SCORE_MAX)
    } else {
        0.0
    }
}

/// Bar fill in percent: `clamp(v, 0, 10) * 10`; absent → 0.
#[inline]
pub fn bar_width_pct(score: Option<f64>) -> f64 {
    score.map(|v| clamp_sub_score(v) * 10.0).unwrap_or(0.0)
}

/// CSS width token for a bar, e.g. `73%` or `62.5%`.
pub fn css_percent(width: f64) -> String {
    format!("{}%", trim_decimal(width))
}

/// Sub-score text: shortest decimal form of the backend number, `—` if absent.
pub fn sub_score_text(score: Option<f64>) -> String {
    match score {
        Some(v) if v.is_finite() => {
            // `-0` would leak through Display.
            let v = if v == 0.0 { 0.0 } else { v };
            format!("{v}")
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Arc Rank text: rounded integer on the 0–100 scale, `—` if absent.
pub fn arc_rank_text(score: Option<f64>) -> String {
    match score {
        Some(v) if v.is_finite() => format!("{}", v.round() as i64),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Integer count text (e.g. word counts), `—` if absent.
pub fn count_text(n: Option<f64>) -> String {
    match n {
        Some(v) if v.is_finite() && v >= 0.0 => format!("{}", v.round() as u64),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Two decimals at most, trailing zeros removed (`73.00` → `73`).
fn trim_decimal(x: f64) -> String {
    let s = format!("{x:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_width_is_clamped_times_ten() {
        for v in [0.0, 0.5, 3.0, 7.3, 9.99, 10.0] {
            assert_eq!(bar_width_pct(Some(v)), v.clamp(0.0, 10.0) * 10.0);
        }
        assert_eq!(bar_width_pct(Some(-4.0)), 0.0);
        assert_eq!(bar_width_pct(Some(14.0)), 100.0);
        assert_eq!(bar_width_pct(None), 0.0);
    }

    #[test]
    fn css_percent_trims_float_noise() {
        assert_eq!(css_percent(bar_width_pct(Some(7.3))), "73%");
        assert_eq!(css_percent(bar_width_pct(Some(6.25))), "62.5%");
        assert_eq!(css_percent(0.0), "0%");
        assert_eq!(css_percent(100.0), "100%");
    }

    #[test]
    fn sub_score_text_uses_backend_number() {
        assert_eq!(sub_score_text(Some(7.3)), "7.3");
        assert_eq!(sub_score_text(Some(8.0)), "8");
        assert_eq!(sub_score_text(Some(-0.0)), "0");
        assert_eq!(sub_score_text(None), PLACEHOLDER);
        assert_eq!(sub_score_text(Some(f64::NAN)), PLACEHOLDER);
    }

    #[test]
    fn arc_rank_is_integer_text() {
        assert_eq!(arc_rank_text(Some(82.0)), "82");
        assert_eq!(arc_rank_text(Some(74.6)), "75");
        assert_eq!(arc_rank_text(None), PLACEHOLDER);
    }

    #[test]
    fn count_text_rejects_negative() {
        assert_eq!(count_text(Some(1234.0)), "1234");
        assert_eq!(count_text(Some(-1.0)), PLACEHOLDER);
    }
}
