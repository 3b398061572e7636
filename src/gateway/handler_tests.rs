use std::sync::Arc;

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::*;
use crate::classifier::MockClassifier;
use crate::domain::DomainCredibility;
use crate::evidence::mock::MockRetriever;
use crate::evidence::{EvidencePipeline, SimilarityScorer};
use crate::extract::{ExtractError, Extracted, StaticExtractor, TextExtractor};
use crate::history::{HistoryStore, JsonlHistory};
use crate::nlp::NlpAnalyzer;
use crate::scoring::{EngineParts, ScoringConfig, VerificationEngine, Verdict};

const ARTICLE_TEXT: &str = "The DOH confirmed that free flu vaccines will be given to \
senior citizens in Quezon City health centers starting Monday, according to an official advisory.";

struct RejectingExtractor;

#[async_trait]
impl TextExtractor for RejectingExtractor {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    async fn extract(&self, input: &str) -> Result<Extracted, ExtractError> {
        Err(ExtractError::InvalidUrl {
            url: input.to_string(),
        })
    }
}

struct Harness {
    router: Router,
    history: Arc<JsonlHistory>,
}

fn harness_with(classifier: MockClassifier, extractor: Arc<dyn TextExtractor>) -> Harness {
    let domains = Arc::new(DomainCredibility::builtin());
    let history = Arc::new(JsonlHistory::in_memory());
    let engine = VerificationEngine::new(EngineParts {
        nlp: NlpAnalyzer::new(),
        classifier: Arc::new(classifier),
        evidence: EvidencePipeline::new(
            MockRetriever::empty(),
            SimilarityScorer::jaccard(),
            Arc::clone(&domains),
            5,
        ),
        domains,
        scoring: ScoringConfig::default(),
        history: Some(history.clone() as Arc<dyn HistoryStore>),
    });
    let state = AppState::new(Arc::new(engine), extractor, history.clone(), None);
    Harness {
        router: create_router_with_state(state),
        history,
    }
}

fn harness() -> Harness {
    harness_with(
        MockClassifier::returning(Verdict::Credible, 90.0),
        Arc::new(StaticExtractor {
            result: Extracted {
                text: ARTICLE_TEXT.to_string(),
                domain: Some("rappler.com".to_string()),
            },
        }),
    )
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let header = response
        .headers()
        .get(PHILVERIFY_STATUS_HEADER)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, header, json)
}

#[tokio::test]
async fn test_healthz() {
    let h = harness();
    let (status, header, body) = send(&h.router, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(header, PHILVERIFY_STATUS_HEALTHY);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_reports_components() {
    let h = harness();
    let (status, header, body) = send(&h.router, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(header, PHILVERIFY_STATUS_READY);
    assert_eq!(body["components"]["classifier"], "mock");
    assert_eq!(body["components"]["similarity"], "jaccard");
    assert_eq!(body["components"]["extractor"], "static");
}

#[tokio::test]
async fn test_ready_fails_without_data_dir() {
    let domains = Arc::new(DomainCredibility::builtin());
    let history = Arc::new(JsonlHistory::in_memory());
    let engine = VerificationEngine::new(EngineParts {
        nlp: NlpAnalyzer::new(),
        classifier: Arc::new(MockClassifier::returning(Verdict::Credible, 90.0)),
        evidence: EvidencePipeline::new(
            MockRetriever::empty(),
            SimilarityScorer::jaccard(),
            Arc::clone(&domains),
            5,
        ),
        domains,
        scoring: ScoringConfig::default(),
        history: None,
    });
    let state = AppState::new(
        Arc::new(engine),
        Arc::new(RejectingExtractor),
        history,
        Some(std::path::PathBuf::from("/nonexistent/philverify/data")),
    );
    let router = create_router_with_state(state);

    let (status, header, body) = send(&router, get("/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(header, PHILVERIFY_STATUS_NOT_READY);
    assert_eq!(body["components"]["history"], PHILVERIFY_STATUS_ERROR);
}

#[tokio::test]
async fn test_verify_text_returns_result_and_records_history() {
    let h = harness();
    let (status, header, body) = send(
        &h.router,
        post_json("/verify/text", serde_json::json!({ "text": ARTICLE_TEXT })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(header, PHILVERIFY_STATUS_VERIFIED);
    assert_eq!(body["input_type"], "text");
    assert_eq!(body["layer1"]["verdict"], "Credible");
    assert!(body["final_score"].as_f64().is_some());
    assert!(body["domain_credibility"].is_null());
    assert_eq!(h.history.len(), 1);
}

#[tokio::test]
async fn test_verify_text_length_limits() {
    let h = harness();

    let (status, header, body) = send(
        &h.router,
        post_json("/verify/text", serde_json::json!({ "text": "too short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header, "invalid_request");
    assert_eq!(body["code"], 400);

    let long = "a".repeat(10_001);
    let (status, _, _) = send(
        &h.router,
        post_json("/verify/text", serde_json::json!({ "text": long })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(h.history.is_empty());
}

#[tokio::test]
async fn test_verify_text_rejects_wrong_schema() {
    let h = harness();
    let (status, _, body) = send(
        &h.router,
        post_json("/verify/text", serde_json::json!({ "content": ARTICLE_TEXT })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid request schema"));
}

#[tokio::test]
async fn test_verify_text_classifier_failure_is_500() {
    let h = harness_with(MockClassifier::failing(), Arc::new(RejectingExtractor));
    let (status, header, body) = send(
        &h.router,
        post_json("/verify/text", serde_json::json!({ "text": ARTICLE_TEXT })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header, "classification_error");
    assert_eq!(body["code"], 500);
}

#[tokio::test]
async fn test_verify_url_uses_source_domain() {
    let h = harness();
    let (status, _, body) = send(
        &h.router,
        post_json(
            "/verify/url",
            serde_json::json!({ "url": "https://www.rappler.com/nation/flu-vaccines" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_type"], "url");
    assert_eq!(body["domain_credibility"]["domain"], "rappler.com");
    assert_eq!(body["domain_credibility"]["tier"], 1);
    assert_eq!(body["layer2"]["evidence_score"], 65.0);
}

#[tokio::test]
async fn test_verify_url_short_extraction_is_422() {
    let h = harness_with(
        MockClassifier::returning(Verdict::Credible, 90.0),
        Arc::new(StaticExtractor {
            result: Extracted {
                text: "Login required".to_string(),
                domain: Some("example.com".to_string()),
            },
        }),
    );
    let (status, header, _) = send(
        &h.router,
        post_json("/verify/url", serde_json::json!({ "url": "https://example.com/a" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(header, "extraction_error");
}

#[tokio::test]
async fn test_verify_url_invalid_url_is_400() {
    let h = harness_with(
        MockClassifier::returning(Verdict::Credible, 90.0),
        Arc::new(RejectingExtractor),
    );
    let (status, _, _) = send(
        &h.router,
        post_json("/verify/url", serde_json::json!({ "url": "not a url" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_listing_and_lookup() {
    let h = harness();
    send(
        &h.router,
        post_json("/verify/text", serde_json::json!({ "text": ARTICLE_TEXT })),
    )
    .await;

    let (status, _, page) = send(&h.router, get("/history?page=1&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    let id = page["entries"][0]["id"].as_str().unwrap().to_string();

    let (status, _, entry) = send(&h.router, get(&format!("/history/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["id"], id.as_str());

    let (status, header, _) = send(&h.router, get("/history/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(header, "not_found");
}

#[tokio::test]
async fn test_history_query_validation() {
    let h = harness();
    let (status, _, _) = send(&h.router, get("/history?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(&h.router, get("/history?verdict=Maybe")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Maybe"));

    let (status, _, page) = send(&h.router, get("/history?verdict=Likely%20Fake")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_trends() {
    let h = harness();
    send(
        &h.router,
        post_json("/verify/text", serde_json::json!({ "text": ARTICLE_TEXT })),
    )
    .await;

    let (status, _, report) = send(&h.router, get("/trends?days=7&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["top_entities"][0]["entity"], "DOH");
    assert_eq!(report["verdict_by_day"].as_array().unwrap().len(), 1);

    let (status, _, _) = send(&h.router, get("/trends?days=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
