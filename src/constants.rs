//! Cross-cutting, shared constants.
//!
//! Scoring weights and thresholds here are only defaults: the live values come from
//! [`ScoringConfig`](crate::scoring::ScoringConfig) so they can be tuned per deployment.

/// Default weight of the Layer-1 classifier in the fused score.
pub const DEFAULT_ML_WEIGHT: f64 = 0.40;

/// Default weight of the Layer-2 evidence score in the fused score.
pub const DEFAULT_EVIDENCE_WEIGHT: f64 = 0.60;

/// Scores at or above this map to `Credible`.
pub const DEFAULT_CREDIBLE_THRESHOLD: f64 = 70.0;

/// Scores at or above this (and below the credible threshold) map to `Unverified`.
pub const DEFAULT_FAKE_THRESHOLD: f64 = 40.0;

/// Neutral evidence score used when nothing is known about the source.
pub const NEUTRAL_EVIDENCE_SCORE: f64 = 50.0;

/// Lower and upper bound of every 0–100 score in the pipeline.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Evidence text is cut to this many characters before embedding.
pub const EVIDENCE_CHAR_BUDGET: usize = 512;

/// Decimal places kept on similarity scores.
pub const SIMILARITY_PRECISION: i32 = 4;

/// Characters of input text kept in a history entry preview.
pub const HISTORY_PREVIEW_CHARS: usize = 120;

/// Characters of the claim used as a search query.
pub const CLAIM_QUERY_CHARS: usize = 100;

/// Default number of evidence articles scored per request.
pub const DEFAULT_MAX_EVIDENCE_RESULTS: usize = 5;

/// Rounds `value` to `places` decimal places (half away from zero).
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Clamps to `[SCORE_MIN, SCORE_MAX]` and rounds to one decimal.
#[inline]
pub fn bounded_score(value: f64) -> f64 {
    let clamped = if value.is_nan() {
        SCORE_MIN
    } else {
        value.clamp(SCORE_MIN, SCORE_MAX)
    };
    round_to(clamped, 1)
}

/// Truncates `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(72.25, 1), 72.3);
        assert_eq!(round_to(-3.04, 1), -3.0);
    }

    #[test]
    fn test_bounded_score_clamps() {
        assert_eq!(bounded_score(140.0), 100.0);
        assert_eq!(bounded_score(-12.5), 0.0);
        assert_eq!(bounded_score(55.55), 55.6);
        assert_eq!(bounded_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("ñañaña", 2), "ña");
        assert_eq!(truncate_chars("", 4), "");
    }
}
