//! End-to-end verification with scripted news sources.

use std::sync::Arc;
use std::time::Duration;

use philverify::classifier::MockClassifier;
use philverify::domain::DomainCredibility;
use philverify::evidence::mock::{MockNewsSource, article};
use philverify::evidence::{
    EvidenceCache, EvidenceFetcher, EvidencePipeline, NewsSource, SimilarityScorer, Stance,
};
use philverify::history::{HistoryStore, JsonlHistory};
use philverify::nlp::NlpAnalyzer;
use philverify::scoring::{
    EngineParts, InputType, ScoringConfig, VerificationEngine, VerificationError, Verdict,
};
use tempfile::tempdir;

const POST: &str = "DOH confirms free flu vaccines for seniors in Quezon City";

fn supporting_articles() -> Vec<philverify::evidence::EvidenceArticle> {
    vec![
        article(
            "DOH confirms free flu vaccines for seniors in Quezon City",
            "An official advisory.",
            "https://newsinfo.inquirer.net/1900000/doh-flu-vaccines",
        ),
        article(
            "DOH confirms free flu vaccines for seniors in Quezon City",
            "An official advisory.",
            "https://www.philstar.com/headlines/2026/10/01/doh-flu-vaccines",
        ),
    ]
}

fn fetcher(primary: Arc<MockNewsSource>, secondary: Arc<MockNewsSource>) -> EvidenceFetcher {
    EvidenceFetcher::new(
        Some(primary as Arc<dyn NewsSource>),
        Some(secondary as Arc<dyn NewsSource>),
        EvidenceCache::new(64, Duration::from_secs(60)),
        Duration::from_millis(200),
    )
}

fn engine(
    classifier: MockClassifier,
    fetcher: EvidenceFetcher,
    history: Arc<dyn HistoryStore>,
) -> VerificationEngine {
    let domains = Arc::new(DomainCredibility::builtin());
    VerificationEngine::new(EngineParts {
        nlp: NlpAnalyzer::new(),
        classifier: Arc::new(classifier),
        evidence: EvidencePipeline::new(
            Arc::new(fetcher),
            SimilarityScorer::jaccard(),
            Arc::clone(&domains),
            5,
        ),
        domains,
        scoring: ScoringConfig::default(),
        history: Some(history),
    })
}

#[tokio::test]
async fn test_secondary_source_carries_failed_primary() {
    let primary = Arc::new(MockNewsSource::failing("primary"));
    let secondary = Arc::new(MockNewsSource::new("secondary", supporting_articles()));
    let engine = engine(
        MockClassifier::returning(Verdict::Credible, 80.0),
        fetcher(primary.clone(), secondary.clone()),
        Arc::new(JsonlHistory::in_memory()),
    );

    let result = engine
        .run_verification(POST, InputType::Text, None)
        .await
        .unwrap();

    assert_eq!(result.layer2.sources.len(), 2);
    assert!(result.layer2.sources.iter().all(|s| s.stance == Stance::Supports));
    assert_eq!(result.layer2.verdict, Verdict::Credible);
    assert_eq!(result.layer2.evidence_score, 75.4);
    assert_eq!(result.final_score, 77.2);
    assert_eq!(result.verdict, Verdict::Credible);
    assert_eq!(primary.calls(), 1);
}

#[tokio::test]
async fn test_all_sources_down_degrades_to_fallback() {
    let engine = engine(
        MockClassifier::returning(Verdict::Credible, 80.0),
        fetcher(
            Arc::new(MockNewsSource::failing("primary")),
            Arc::new(MockNewsSource::failing("secondary")),
        ),
        Arc::new(JsonlHistory::in_memory()),
    );

    let result = engine
        .run_verification(POST, InputType::Text, Some("rappler.com"))
        .await
        .unwrap();

    assert!(result.layer2.sources.is_empty());
    assert_eq!(result.layer2.evidence_score, 65.0);
    assert_eq!(result.layer2.verdict, Verdict::Unverified);
}

#[tokio::test]
async fn test_slow_source_is_cut_off_by_timeout() {
    let slow = Arc::new(
        MockNewsSource::new("slow", supporting_articles()).with_delay(Duration::from_secs(2)),
    );
    let fast = Arc::new(MockNewsSource::new("fast", supporting_articles()[..1].to_vec()));
    let engine = engine(
        MockClassifier::returning(Verdict::Credible, 80.0),
        fetcher(slow, fast),
        Arc::new(JsonlHistory::in_memory()),
    );

    let result = tokio::time::timeout(
        Duration::from_secs(1),
        engine.run_verification(POST, InputType::Text, None),
    )
    .await
    .expect("verification should not wait for the slow source")
    .unwrap();

    assert_eq!(result.layer2.sources.len(), 1);
    assert_eq!(result.layer2.verdict, Verdict::Unverified);
}

#[tokio::test]
async fn test_repeat_verification_reuses_evidence_but_not_verdicts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.jsonl");
    let history = Arc::new(JsonlHistory::open(&path).unwrap());

    let primary = Arc::new(MockNewsSource::new("primary", supporting_articles()));
    let secondary = Arc::new(MockNewsSource::new("secondary", Vec::new()));
    let engine = engine(
        MockClassifier::returning(Verdict::Credible, 80.0),
        fetcher(primary.clone(), secondary),
        history.clone(),
    );

    let first = engine
        .run_verification(POST, InputType::Text, None)
        .await
        .unwrap();
    let second = engine
        .run_verification(POST, InputType::Text, None)
        .await
        .unwrap();

    assert_eq!(primary.calls(), 1);
    assert_eq!(first.final_score, second.final_score);

    let entries = history.snapshot();
    assert_eq!(entries.len(), 2);
    assert_ne!(entries[0].id, entries[1].id);
    drop(engine);
    drop(history);

    let reopened = JsonlHistory::open(&path).unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.snapshot()[0].layer2.source_count, 2);
}

#[tokio::test]
async fn test_classifier_failure_reaches_caller() {
    let history = Arc::new(JsonlHistory::in_memory());
    let engine = engine(
        MockClassifier::failing(),
        fetcher(
            Arc::new(MockNewsSource::new("primary", supporting_articles())),
            Arc::new(MockNewsSource::new("secondary", Vec::new())),
        ),
        history.clone(),
    );

    let err = engine
        .run_verification(POST, InputType::Text, None)
        .await
        .unwrap_err();

    assert!(matches!(err, VerificationError::Classification(_)));
    assert!(history.is_empty());
}
