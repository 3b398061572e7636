use tracing::warn;

use crate::config::ConfigError;
use crate::config::env;
use crate::constants::{
    DEFAULT_CREDIBLE_THRESHOLD, DEFAULT_EVIDENCE_WEIGHT, DEFAULT_FAKE_THRESHOLD,
    DEFAULT_ML_WEIGHT, NEUTRAL_EVIDENCE_SCORE, SCORE_MAX, SCORE_MIN,
};
use crate::domain::DomainTier;

/// Evidence score assumed when retrieval yields nothing, per source tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierDefaults {
    pub credible: f64,
    pub satire_opinion: f64,
    pub suspicious: f64,
    pub known_fake: f64,
}

impl Default for TierDefaults {
    fn default() -> Self {
        Self::from_array([65.0, 45.0, 50.0, 25.0])
    }
}

impl TierDefaults {
    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            credible: values[0],
            satire_opinion: values[1],
            suspicious: values[2],
            known_fake: values[3],
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [
            self.credible,
            self.satire_opinion,
            self.suspicious,
            self.known_fake,
        ]
    }

    pub fn for_tier(&self, tier: DomainTier) -> f64 {
        match tier {
            DomainTier::Credible => self.credible,
            DomainTier::SatireOpinion => self.satire_opinion,
            DomainTier::Suspicious => self.suspicious,
            DomainTier::KnownFake => self.known_fake,
        }
    }
}

/// Fusion weights and verdict thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Weight of the classifier's credibility. Default: `0.40`.
    pub ml_weight: f64,
    /// Weight of the evidence score. Default: `0.60`.
    pub evidence_weight: f64,
    /// Scores at or above this are `Credible`. Default: `70`.
    pub credible_threshold: f64,
    /// Scores at or above this (below credible) are `Unverified`. Default: `40`.
    pub fake_threshold: f64,
    /// No-evidence fallback by source tier. Default: `65,45,50,25`.
    pub tier_evidence_defaults: TierDefaults,
    /// No-evidence fallback when the source is unknown. Default: `50`.
    pub neutral_evidence_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ml_weight: DEFAULT_ML_WEIGHT,
            evidence_weight: DEFAULT_EVIDENCE_WEIGHT,
            credible_threshold: DEFAULT_CREDIBLE_THRESHOLD,
            fake_threshold: DEFAULT_FAKE_THRESHOLD,
            tier_evidence_defaults: TierDefaults::default(),
            neutral_evidence_score: NEUTRAL_EVIDENCE_SCORE,
        }
    }
}

impl ScoringConfig {
    pub const ENV_ML_WEIGHT: &'static str = "PHILVERIFY_ML_WEIGHT";
    pub const ENV_EVIDENCE_WEIGHT: &'static str = "PHILVERIFY_EVIDENCE_WEIGHT";
    pub const ENV_CREDIBLE_THRESHOLD: &'static str = "PHILVERIFY_CREDIBLE_THRESHOLD";
    pub const ENV_FAKE_THRESHOLD: &'static str = "PHILVERIFY_FAKE_THRESHOLD";
    pub const ENV_TIER_EVIDENCE_DEFAULTS: &'static str = "PHILVERIFY_TIER_EVIDENCE_DEFAULTS";

    /// Unparsable values fall back to defaults; call [`validate`](Self::validate)
    /// to reject out-of-range ones.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ml_weight: env::parse_or(Self::ENV_ML_WEIGHT, defaults.ml_weight),
            evidence_weight: env::parse_or(Self::ENV_EVIDENCE_WEIGHT, defaults.evidence_weight),
            credible_threshold: env::parse_or(
                Self::ENV_CREDIBLE_THRESHOLD,
                defaults.credible_threshold,
            ),
            fake_threshold: env::parse_or(Self::ENV_FAKE_THRESHOLD, defaults.fake_threshold),
            tier_evidence_defaults: TierDefaults::from_array(env::f64_array_or(
                Self::ENV_TIER_EVIDENCE_DEFAULTS,
                defaults.tier_evidence_defaults.to_array(),
            )),
            neutral_evidence_score: defaults.neutral_evidence_score,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_range("ml_weight", self.ml_weight)?;
        unit_range("evidence_weight", self.evidence_weight)?;
        score_range("credible_threshold", self.credible_threshold)?;
        score_range("fake_threshold", self.fake_threshold)?;
        score_range("neutral_evidence_score", self.neutral_evidence_score)?;
        for (name, value) in [
            ("tier_evidence_defaults.credible", self.tier_evidence_defaults.credible),
            ("tier_evidence_defaults.satire_opinion", self.tier_evidence_defaults.satire_opinion),
            ("tier_evidence_defaults.suspicious", self.tier_evidence_defaults.suspicious),
            ("tier_evidence_defaults.known_fake", self.tier_evidence_defaults.known_fake),
        ] {
            score_range(name, value)?;
        }

        if self.fake_threshold > self.credible_threshold {
            return Err(ConfigError::OutOfRange {
                name: "fake_threshold",
                value: self.fake_threshold,
                reason: "must not exceed credible_threshold",
            });
        }

        let total = self.ml_weight + self.evidence_weight;
        if (total - 1.0).abs() > 1e-6 {
            warn!(
                ml_weight = self.ml_weight,
                evidence_weight = self.evidence_weight,
                "Scoring weights do not sum to 1.0"
            );
        }

        Ok(())
    }
}

fn unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            reason: "must be within [0, 1]",
        })
    }
}

fn score_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (SCORE_MIN..=SCORE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            reason: "must be within [0, 100]",
        })
    }
}
