//! Fusion of the classifier, the evidence score, and the source's reputation.
//!
//! ```text
//! ml_credibility = confidence            if Layer 1 said Credible
//!                  100 - confidence      otherwise
//! base           = ml_credibility * ml_weight + evidence_score * evidence_weight
//! multiplier     = min(1.5, 1 + |ml_credibility - implied(tier)| / 50 * 0.5)
//! final          = clamp(base + tier_adjustment * multiplier, 0, 100)
//! ```

use std::sync::Arc;

use serde::Serialize;

use super::config::ScoringConfig;
use super::types::{DomainAdjustment, Layer1Result, Verdict};
use crate::constants::{SCORE_MAX, SCORE_MIN, bounded_score};
use crate::domain::{DomainCredibility, DomainResult, DomainTier};

/// Upper bound of the disagreement multiplier.
pub const MAX_MULTIPLIER: f64 = 1.5;

/// Distance between credibility scores that counts as one unit of disagreement.
const DISAGREEMENT_SCALE: f64 = 50.0;

/// Multiplier gained per unit of disagreement.
const DISAGREEMENT_GAIN: f64 = 0.5;

/// The classifier's output on a single 0–100 credibility axis.
pub fn ml_credibility(layer1: &Layer1Result) -> f64 {
    let confidence = layer1.confidence.clamp(SCORE_MIN, SCORE_MAX);
    if layer1.verdict == Verdict::Credible {
        confidence
    } else {
        SCORE_MAX - confidence
    }
}

/// Scales the tier adjustment by how far the classifier is from what the tier
/// implies. Always within `[1.0, 1.5]`.
pub fn disagreement_multiplier(ml_credibility: f64, tier: DomainTier) -> f64 {
    let disagreement = (ml_credibility - tier.implied_credibility()).abs() / DISAGREEMENT_SCALE;
    if disagreement.is_nan() {
        return 1.0;
    }
    (1.0 + disagreement * DISAGREEMENT_GAIN).min(MAX_MULTIPLIER)
}

/// Outcome of [`FusionEngine::fuse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionOutcome {
    pub final_score: f64,
    pub verdict: Verdict,
    pub ml_credibility: f64,
    pub base_score: f64,
    pub domain: Option<DomainResult>,
    pub adjustment: Option<DomainAdjustment>,
}

/// Stateless apart from its configuration: equal inputs give equal outputs.
#[derive(Debug, Clone)]
pub struct FusionEngine {
    config: ScoringConfig,
    domains: Arc<DomainCredibility>,
}

impl FusionEngine {
    pub fn new(config: ScoringConfig, domains: Arc<DomainCredibility>) -> Self {
        Self { config, domains }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn domains(&self) -> &DomainCredibility {
        &self.domains
    }

    pub fn map_verdict(&self, score: f64) -> Verdict {
        if score >= self.config.credible_threshold {
            Verdict::Credible
        } else if score >= self.config.fake_threshold {
            Verdict::Unverified
        } else {
            Verdict::LikelyFake
        }
    }

    /// Looks up a non-blank source domain.
    pub fn lookup_source(&self, source_domain: Option<&str>) -> Option<DomainResult> {
        source_domain
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| self.domains.lookup(d))
    }

    /// Evidence score to use when retrieval returns nothing.
    pub fn fallback_evidence_score(&self, source_domain: Option<&str>) -> f64 {
        match self.lookup_source(source_domain) {
            Some(domain) => self.config.tier_evidence_defaults.for_tier(domain.tier),
            None => self.config.neutral_evidence_score,
        }
    }

    pub fn fuse(
        &self,
        layer1: &Layer1Result,
        evidence_score: f64,
        source_domain: Option<&str>,
    ) -> FusionOutcome {
        let ml_credibility = ml_credibility(layer1);
        let evidence_score = evidence_score.clamp(SCORE_MIN, SCORE_MAX);
        let base_score =
            ml_credibility * self.config.ml_weight + evidence_score * self.config.evidence_weight;

        let domain = self.lookup_source(source_domain);
        let adjustment = domain.as_ref().map(|d| {
            let multiplier = disagreement_multiplier(ml_credibility, d.tier);
            DomainAdjustment {
                tier: d.tier,
                base_adjustment: d.score_adjustment,
                multiplier,
                applied: d.score_adjustment * multiplier,
            }
        });

        let final_score =
            bounded_score(base_score + adjustment.as_ref().map_or(0.0, |a| a.applied));

        FusionOutcome {
            final_score,
            verdict: self.map_verdict(final_score),
            ml_credibility,
            base_score,
            domain,
            adjustment,
        }
    }
}
