use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use serial_test::serial;

use super::*;
use crate::classifier::MockClassifier;
use crate::config::ConfigError;
use crate::domain::{DomainCredibility, DomainTier};
use crate::evidence::mock::{MockRetriever, article};
use crate::evidence::{EvidencePipeline, SimilarityScorer, Stance};
use crate::history::{
    HistoryEntry, HistoryError, HistoryPage, HistoryQuery, HistoryStore, JsonlHistory,
};
use crate::nlp::NlpAnalyzer;

fn layer1(verdict: Verdict, confidence: f64) -> Layer1Result {
    Layer1Result {
        verdict,
        confidence,
        triggered_features: Vec::new(),
    }
}

fn fusion() -> FusionEngine {
    FusionEngine::new(ScoringConfig::default(), Arc::new(DomainCredibility::builtin()))
}

mod fusion_tests {
    use super::*;

    #[test]
    fn test_ml_credibility_axis() {
        assert_eq!(ml_credibility(&layer1(Verdict::Credible, 85.0)), 85.0);
        assert_eq!(ml_credibility(&layer1(Verdict::LikelyFake, 85.0)), 15.0);
        assert_eq!(ml_credibility(&layer1(Verdict::Unverified, 60.0)), 40.0);
    }

    #[test]
    fn test_weighted_blend_without_domain() {
        let outcome = fusion().fuse(&layer1(Verdict::Credible, 90.0), 50.0, None);
        assert_eq!(outcome.final_score, 66.0);
        assert_eq!(outcome.verdict, Verdict::Unverified);
        assert!(outcome.domain.is_none());
        assert!(outcome.adjustment.is_none());
    }

    #[test]
    fn test_blank_domain_is_ignored() {
        let outcome = fusion().fuse(&layer1(Verdict::Credible, 90.0), 50.0, Some("  "));
        assert!(outcome.adjustment.is_none());
    }

    #[test]
    fn test_credible_source_disagreement_amplifies_boost() {
        // ml_credibility 20 vs implied 75: disagreement 1.1, multiplier capped at 1.5
        let outcome = fusion().fuse(
            &layer1(Verdict::LikelyFake, 80.0),
            50.0,
            Some("https://www.rappler.com/nation/x"),
        );
        let adjustment = outcome.adjustment.unwrap();
        assert_eq!(adjustment.tier, DomainTier::Credible);
        assert_eq!(adjustment.multiplier, 1.5);
        assert_eq!(adjustment.applied, 30.0);
        assert_eq!(outcome.final_score, 68.0);
        assert_eq!(outcome.verdict, Verdict::Unverified);
    }

    #[test]
    fn test_unknown_domain_is_suspicious() {
        let outcome = fusion().fuse(
            &layer1(Verdict::Credible, 50.0),
            50.0,
            Some("totally-unknown-site.example"),
        );
        let adjustment = outcome.adjustment.unwrap();
        assert_eq!(adjustment.tier, DomainTier::Suspicious);
        assert_eq!(adjustment.base_adjustment, -10.0);
        assert_eq!(adjustment.multiplier, 1.0);
        assert_eq!(outcome.final_score, 40.0);
        assert_eq!(outcome.verdict, Verdict::Unverified);
    }

    #[test]
    fn test_score_clamped_both_ends() {
        let high = fusion().fuse(&layer1(Verdict::Credible, 100.0), 100.0, Some("rappler.com"));
        assert_eq!(high.final_score, 100.0);

        let low = fusion().fuse(
            &layer1(Verdict::LikelyFake, 100.0),
            0.0,
            Some("duterte.today"),
        );
        assert_eq!(low.final_score, 0.0);
        assert_eq!(low.verdict, Verdict::LikelyFake);
    }

    #[test]
    fn test_multiplier_bounds() {
        assert_eq!(disagreement_multiplier(75.0, DomainTier::Credible), 1.0);
        assert_eq!(disagreement_multiplier(0.0, DomainTier::Credible), MAX_MULTIPLIER);
        assert_eq!(disagreement_multiplier(50.0, DomainTier::KnownFake), 1.25);
        assert_eq!(disagreement_multiplier(f64::NAN, DomainTier::Suspicious), 1.0);
    }

    #[test]
    fn test_map_verdict_thresholds_are_inclusive() {
        let engine = fusion();
        assert_eq!(engine.map_verdict(70.0), Verdict::Credible);
        assert_eq!(engine.map_verdict(69.9), Verdict::Unverified);
        assert_eq!(engine.map_verdict(40.0), Verdict::Unverified);
        assert_eq!(engine.map_verdict(39.9), Verdict::LikelyFake);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = ScoringConfig {
            credible_threshold: 80.0,
            fake_threshold: 20.0,
            ..Default::default()
        };
        let engine = FusionEngine::new(config, Arc::new(DomainCredibility::builtin()));
        assert_eq!(engine.map_verdict(75.0), Verdict::Unverified);
        assert_eq!(engine.map_verdict(25.0), Verdict::Unverified);
        assert_eq!(engine.map_verdict(19.0), Verdict::LikelyFake);
    }

    #[test]
    fn test_fallback_evidence_score_by_tier() {
        let engine = fusion();
        assert_eq!(engine.fallback_evidence_score(None), 50.0);
        assert_eq!(engine.fallback_evidence_score(Some("rappler.com")), 65.0);
        assert_eq!(engine.fallback_evidence_score(Some("unknown.example")), 50.0);
        assert_eq!(engine.fallback_evidence_score(Some("duterte.today")), 25.0);
    }

    #[test]
    fn test_fuse_is_idempotent() {
        let engine = fusion();
        let l1 = layer1(Verdict::Unverified, 63.0);
        assert_eq!(
            engine.fuse(&l1, 41.5, Some("inquirer.net")),
            engine.fuse(&l1, 41.5, Some("inquirer.net"))
        );
    }
}

mod config_tests {
    use super::*;

    fn clear_env() {
        for name in [
            ScoringConfig::ENV_ML_WEIGHT,
            ScoringConfig::ENV_EVIDENCE_WEIGHT,
            ScoringConfig::ENV_CREDIBLE_THRESHOLD,
            ScoringConfig::ENV_FAKE_THRESHOLD,
            ScoringConfig::ENV_TIER_EVIDENCE_DEFAULTS,
        ] {
            unsafe { env::remove_var(name) };
        }
    }

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.ml_weight, 0.40);
        assert_eq!(config.evidence_weight, 0.60);
        assert_eq!(config.credible_threshold, 70.0);
        assert_eq!(config.fake_threshold, 40.0);
        assert_eq!(config.tier_evidence_defaults.to_array(), [65.0, 45.0, 50.0, 25.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            env::set_var(ScoringConfig::ENV_ML_WEIGHT, "0.5");
            env::set_var(ScoringConfig::ENV_EVIDENCE_WEIGHT, "0.5");
            env::set_var(ScoringConfig::ENV_CREDIBLE_THRESHOLD, "75");
            env::set_var(ScoringConfig::ENV_TIER_EVIDENCE_DEFAULTS, "70, 40, 50, 20");
        }

        let config = ScoringConfig::from_env();
        assert_eq!(config.ml_weight, 0.5);
        assert_eq!(config.evidence_weight, 0.5);
        assert_eq!(config.credible_threshold, 75.0);
        assert_eq!(config.fake_threshold, 40.0);
        assert_eq!(config.tier_evidence_defaults.credible, 70.0);
        assert_eq!(config.tier_evidence_defaults.known_fake, 20.0);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_garbage() {
        clear_env();
        unsafe {
            env::set_var(ScoringConfig::ENV_ML_WEIGHT, "heavy");
            env::set_var(ScoringConfig::ENV_TIER_EVIDENCE_DEFAULTS, "1,2,3");
        }

        let config = ScoringConfig::from_env();
        assert_eq!(config, ScoringConfig::default());

        clear_env();
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad_weight = ScoringConfig {
            ml_weight: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            bad_weight.validate(),
            Err(ConfigError::OutOfRange { name: "ml_weight", .. })
        ));

        let bad_threshold = ScoringConfig {
            credible_threshold: 140.0,
            ..Default::default()
        };
        assert!(bad_threshold.validate().is_err());

        let inverted = ScoringConfig {
            credible_threshold: 30.0,
            fake_threshold: 60.0,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::OutOfRange { name: "fake_threshold", .. })
        ));
    }

    #[test]
    fn test_validate_allows_weights_not_summing_to_one() {
        let config = ScoringConfig {
            ml_weight: 0.3,
            evidence_weight: 0.3,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

mod engine_tests {
    use super::*;

    struct FailingHistory;

    #[async_trait]
    impl HistoryStore for FailingHistory {
        async fn record(&self, _entry: HistoryEntry) -> Result<(), HistoryError> {
            Err(HistoryError::Task {
                reason: "disk full".to_string(),
            })
        }

        fn list(&self, _query: &HistoryQuery) -> Result<HistoryPage, HistoryError> {
            Err(HistoryError::Task {
                reason: "unavailable".to_string(),
            })
        }

        fn get(&self, _id: &str) -> Option<HistoryEntry> {
            None
        }

        fn snapshot(&self) -> Vec<HistoryEntry> {
            Vec::new()
        }
    }

    fn engine(
        classifier: Arc<MockClassifier>,
        retriever: Arc<MockRetriever>,
        history: Option<Arc<dyn HistoryStore>>,
    ) -> VerificationEngine {
        let domains = Arc::new(DomainCredibility::builtin());
        VerificationEngine::new(EngineParts {
            nlp: NlpAnalyzer::new(),
            classifier,
            evidence: EvidencePipeline::new(
                retriever,
                SimilarityScorer::jaccard(),
                Arc::clone(&domains),
                5,
            ),
            domains,
            scoring: ScoringConfig::default(),
            history,
        })
    }

    const TEXT: &str = "The DOH announced free flu vaccines for seniors in Quezon City starting Monday.";

    #[tokio::test]
    async fn test_no_evidence_uses_neutral_fallback() {
        let classifier = Arc::new(MockClassifier::returning(Verdict::Credible, 90.0));
        let engine = engine(classifier.clone(), MockRetriever::empty(), None);

        let result = engine
            .run_verification(TEXT, InputType::Text, None)
            .await
            .unwrap();

        assert_eq!(result.layer2.evidence_score, 50.0);
        assert!(result.layer2.sources.is_empty());
        assert_eq!(result.layer2.verdict, Verdict::Unverified);
        assert_eq!(result.final_score, 66.0);
        assert_eq!(result.verdict, Verdict::Unverified);
        assert_eq!(result.confidence, 90.0);
        assert_eq!(result.entities.organizations, vec!["DOH"]);
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_evidence_uses_tier_fallback_and_domain_adjustment() {
        let classifier = Arc::new(MockClassifier::returning(Verdict::Credible, 90.0));
        let engine = engine(classifier, MockRetriever::empty(), None);

        let result = engine
            .run_verification(TEXT, InputType::Url, Some("https://www.rappler.com/nation/x"))
            .await
            .unwrap();

        assert_eq!(result.layer2.evidence_score, 65.0);
        assert_eq!(result.final_score, 98.0);
        assert_eq!(result.verdict, Verdict::Credible);
        assert_eq!(result.domain_credibility.unwrap().tier, DomainTier::Credible);
        assert_eq!(result.input_type, InputType::Url);
    }

    #[tokio::test]
    async fn test_fact_check_evidence_drives_fake_verdict() {
        let classifier = Arc::new(MockClassifier::returning(Verdict::LikelyFake, 80.0));
        let retriever = Arc::new(MockRetriever::new(vec![article(
            "FACT CHECK: Free electricity claim is false",
            "No such program exists.",
            "https://www.rappler.com/newsbreak/fact-check/libreng-kuryente",
        )]));
        let engine = engine(classifier, retriever, None);

        let result = engine
            .run_verification(
                "Marcos says libreng kuryente simula bukas para sa lahat ng pamilya",
                InputType::Text,
                None,
            )
            .await
            .unwrap();

        assert_eq!(result.layer2.sources.len(), 1);
        assert_eq!(result.layer2.sources[0].stance, Stance::Refutes);
        assert_eq!(result.layer2.evidence_score, 36.5);
        assert_eq!(result.layer2.verdict, Verdict::LikelyFake);
        assert_eq!(result.final_score, 29.9);
        assert_eq!(result.verdict, Verdict::LikelyFake);
    }

    #[tokio::test]
    async fn test_classifier_failure_is_fatal() {
        let classifier = Arc::new(MockClassifier::failing());
        let history = Arc::new(JsonlHistory::in_memory());
        let engine = engine(classifier, MockRetriever::empty(), Some(history.clone()));

        let err = engine
            .run_verification(TEXT, InputType::Text, None)
            .await
            .unwrap_err();

        assert!(matches!(err, VerificationError::Classification(_)));
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_classification() {
        let classifier = Arc::new(MockClassifier::returning(Verdict::Credible, 90.0));
        let engine = engine(classifier.clone(), MockRetriever::empty(), None);

        let err = engine
            .run_verification("   ", InputType::Text, None)
            .await
            .unwrap_err();

        assert!(matches!(err, VerificationError::EmptyInput));
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_history_recorded() {
        let classifier = Arc::new(MockClassifier::returning(Verdict::Credible, 90.0));
        let history = Arc::new(JsonlHistory::in_memory());
        let engine = engine(classifier, MockRetriever::empty(), Some(history.clone()));

        let result = engine
            .run_verification(TEXT, InputType::Text, None)
            .await
            .unwrap();

        let entries = history.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].verdict, result.verdict);
        assert_eq!(entries[0].final_score, result.final_score);
        assert_eq!(entries[0].claim_used, result.layer2.claim_used);
        assert_eq!(entries[0].layer1.confidence, 90.0);
    }

    #[tokio::test]
    async fn test_history_failure_is_swallowed() {
        let classifier = Arc::new(MockClassifier::returning(Verdict::Credible, 90.0));
        let engine = engine(classifier, MockRetriever::empty(), Some(Arc::new(FailingHistory)));

        let result = engine.run_verification(TEXT, InputType::Text, None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_nlp_signals_enrich_layer1_features() {
        let classifier = Arc::new(MockClassifier::returning(Verdict::LikelyFake, 70.0));
        let engine = engine(classifier, MockRetriever::empty(), None);

        let result = engine
            .run_verification(
                "SHOCKING!!! fake hoax scam, you won't believe this fraud",
                InputType::Text,
                None,
            )
            .await
            .unwrap();

        let features = &result.layer1.triggered_features;
        assert_eq!(features.len(), 4);
        assert_eq!(features[0], "excessive_punctuation");
        assert_eq!(features[3], HIGH_EMOTION_FEATURE);
        assert_eq!(result.sentiment, "high negative");
    }
}
