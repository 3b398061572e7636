//! Property tests for the scoring arithmetic.

use std::sync::Arc;

use philverify::domain::{DomainCredibility, DomainTier};
use philverify::evidence::{SimilarityScorer, Stance, StanceClassifier, StanceResult, aggregate};
use philverify::scoring::{
    FusionEngine, Layer1Result, MAX_MULTIPLIER, ScoringConfig, Verdict, disagreement_multiplier,
};
use proptest::prelude::*;

const SOURCES: &[Option<&str>] = &[
    None,
    Some("rappler.com"),
    Some("theonion.com"),
    Some("unknown-blog.example"),
    Some("duterte.today"),
];

fn verdict() -> impl Strategy<Value = Verdict> {
    prop::sample::select(Verdict::ALL.to_vec())
}

fn tier() -> impl Strategy<Value = DomainTier> {
    prop::sample::select(DomainTier::ALL.to_vec())
}

fn stance_result() -> impl Strategy<Value = StanceResult> {
    (
        prop::sample::select(vec![Stance::Supports, Stance::Refutes, Stance::NotEnoughInfo]),
        0.0f64..=1.0,
    )
        .prop_map(|(stance, confidence)| StanceResult {
            stance,
            confidence,
            matched_keywords: Vec::new(),
            reason: String::new(),
        })
}

fn stance(kind: Stance, confidence: f64) -> StanceResult {
    StanceResult {
        stance: kind,
        confidence,
        matched_keywords: Vec::new(),
        reason: String::new(),
    }
}

fn engine() -> FusionEngine {
    FusionEngine::new(ScoringConfig::default(), Arc::new(DomainCredibility::builtin()))
}

proptest! {
    #[test]
    fn final_score_is_bounded(
        verdict in verdict(),
        confidence in 0.0f64..=100.0,
        evidence in 0.0f64..=100.0,
        source in prop::sample::select(SOURCES.to_vec()),
    ) {
        let layer1 = Layer1Result { verdict, confidence, triggered_features: Vec::new() };
        let outcome = engine().fuse(&layer1, evidence, source);
        prop_assert!((0.0..=100.0).contains(&outcome.final_score));
    }

    #[test]
    fn multiplier_is_bounded(ml in 0.0f64..=100.0, tier in tier()) {
        let multiplier = disagreement_multiplier(ml, tier);
        prop_assert!((1.0..=MAX_MULTIPLIER).contains(&multiplier));
    }

    #[test]
    fn fuse_is_idempotent(
        verdict in verdict(),
        confidence in 0.0f64..=100.0,
        evidence in 0.0f64..=100.0,
        source in prop::sample::select(SOURCES.to_vec()),
    ) {
        let engine = engine();
        let layer1 = Layer1Result { verdict, confidence, triggered_features: Vec::new() };
        prop_assert_eq!(
            engine.fuse(&layer1, evidence, source),
            engine.fuse(&layer1, evidence, source)
        );
    }

    #[test]
    fn extra_refutation_never_raises_score(
        stances in prop::collection::vec(stance_result(), 0..8),
        confidence in 0.0f64..=1.0,
    ) {
        let sims = vec![0.5; stances.len()];
        let (before, _) = aggregate(&stances, &sims);

        let mut more = stances.clone();
        more.push(stance(Stance::Refutes, confidence));
        let (after, _) = aggregate(&more, &vec![0.5; more.len()]);
        prop_assert!(after <= before);
    }

    #[test]
    fn extra_support_never_lowers_score(
        stances in prop::collection::vec(stance_result(), 0..8),
        similarity in 0.0f64..=1.0,
    ) {
        let mut sims = vec![0.5; stances.len()];
        let (before, _) = aggregate(&stances, &sims);

        let mut more = stances.clone();
        more.push(stance(Stance::Supports, 0.8));
        sims.push(similarity);
        let (after, _) = aggregate(&more, &sims);
        prop_assert!(after >= before);
    }

    #[test]
    fn stance_confidence_is_a_probability(
        claim in "[a-z ]{0,60}",
        title in "[A-Za-z:!? ]{0,80}",
        description in "[a-z ]{0,120}",
        url in prop::sample::select(vec![
            "https://www.rappler.com/newsbreak/fact-check/x",
            "https://news.example.com/story",
            "",
        ]),
        similarity in 0.0f64..=1.0,
    ) {
        let result = StanceClassifier::new().detect(&claim, &title, &description, url, similarity);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn similarity_is_bounded(a in "[a-z ]{0,80}", b in "[a-z ]{0,80}") {
        let score = SimilarityScorer::jaccard().score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn empty_aggregate_is_neutral() {
    assert_eq!(aggregate(&[], &[]), (50.0, Verdict::Unverified));
}

#[test]
fn identical_text_is_fully_similar() {
    let scorer = SimilarityScorer::jaccard();
    assert_eq!(
        scorer.score("free vaccines available now", "free vaccines available now"),
        1.0
    );
}
