use super::types::{Stance, StanceResult};
use crate::constants::{NEUTRAL_EVIDENCE_SCORE, bounded_score};
use crate::scoring::Verdict;

/// Similarity assumed when an entry has no matching similarity value.
pub const MISSING_SIMILARITY: f64 = 0.5;

const SUPPORT_REWARD: f64 = 10.0;
const REFUTE_PENALTY: f64 = 15.0;
const CREDIBLE_MIN_SUPPORTS: usize = 2;
const CREDIBLE_MIN_SCORE: f64 = 60.0;

/// Folds per-article stances into an evidence score (0–100) and a Layer-2 verdict.
///
/// `similarities[i]` pairs with `stances[i]`. Starting from 50, each `Supports` adds
/// `10 × (0.5 + similarity)` and each `Refutes` subtracts `15 × confidence`. The
/// verdict is count-based: more refutations than supports is `LikelyFake`; at least
/// two supports with a score of 60 or more is `Credible`; anything else is `Unverified`.
pub fn aggregate(stances: &[StanceResult], similarities: &[f64]) -> (f64, Verdict) {
    if stances.is_empty() {
        return (NEUTRAL_EVIDENCE_SCORE, Verdict::Unverified);
    }

    let mut score = NEUTRAL_EVIDENCE_SCORE;
    let mut supporting = 0usize;
    let mut refuting = 0usize;

    for (i, stance) in stances.iter().enumerate() {
        let similarity = similarities.get(i).copied().unwrap_or(MISSING_SIMILARITY);
        match stance.stance {
            Stance::Supports => {
                supporting += 1;
                score += SUPPORT_REWARD * (0.5 + similarity);
            }
            Stance::Refutes => {
                refuting += 1;
                score -= REFUTE_PENALTY * stance.confidence;
            }
            Stance::NotEnoughInfo => {}
        }
    }

    let score = bounded_score(score);

    let verdict = if refuting > supporting {
        Verdict::LikelyFake
    } else if supporting >= CREDIBLE_MIN_SUPPORTS && score >= CREDIBLE_MIN_SCORE {
        Verdict::Credible
    } else {
        Verdict::Unverified
    };

    (score, verdict)
}
