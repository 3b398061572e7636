//! Fusion of Layer 1, Layer 2, and source reputation into one verdict.
//!
//! [`FusionEngine`] holds the arithmetic: the classifier's confidence is mapped to a
//! credibility axis, blended with the evidence score by configured weights, and
//! shifted by the source tier's adjustment (scaled by the disagreement multiplier).
//! The clamped result is mapped to a verdict by two configured thresholds.
//!
//! [`VerificationEngine`] drives a whole request around that step.

pub mod config;
pub mod engine;
pub mod error;
pub mod fusion;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{ScoringConfig, TierDefaults};
pub use engine::{EngineParts, HIGH_EMOTION_FEATURE, VerificationEngine};
pub use error::VerificationError;
pub use fusion::{
    FusionEngine, FusionOutcome, MAX_MULTIPLIER, disagreement_multiplier, ml_credibility,
};
pub use types::{
    DomainAdjustment, EntitiesResult, InputType, Language, Layer1Result, VerificationResult,
    Verdict,
};
