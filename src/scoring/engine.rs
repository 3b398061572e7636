use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::config::ScoringConfig;
use super::error::VerificationError;
use super::fusion::FusionEngine;
use super::types::{InputType, Layer1Result, VerificationResult};
use crate::classifier::Classifier;
use crate::constants::round_to;
use crate::domain::DomainCredibility;
use crate::evidence::EvidencePipeline;
use crate::history::{HistoryEntry, HistoryStore};
use crate::nlp::{NlpAnalysis, NlpAnalyzer, Sentiment};

/// Triggered-pattern count copied from the clickbait detector into Layer 1.
const CLICKBAIT_FEATURES: usize = 3;

/// Feature added to Layer 1 when the text is strongly negative.
pub const HIGH_EMOTION_FEATURE: &str = "high emotional language";

/// Collaborators for [`VerificationEngine::new`], all built once at startup.
pub struct EngineParts {
    pub nlp: NlpAnalyzer,
    pub classifier: Arc<dyn Classifier>,
    pub evidence: EvidencePipeline,
    pub domains: Arc<DomainCredibility>,
    pub scoring: ScoringConfig,
    /// `None` disables history recording.
    pub history: Option<Arc<dyn HistoryStore>>,
}

/// Runs one verification end to end: NLP, Layer 1, Layer 2, fusion, history.
#[derive(Clone)]
pub struct VerificationEngine {
    nlp: NlpAnalyzer,
    classifier: Arc<dyn Classifier>,
    evidence: EvidencePipeline,
    fusion: FusionEngine,
    history: Option<Arc<dyn HistoryStore>>,
}

impl std::fmt::Debug for VerificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationEngine")
            .field("classifier", &self.classifier.name())
            .field("evidence", &self.evidence)
            .field("fusion", &self.fusion)
            .field("history", &self.history.is_some())
            .finish()
    }
}

impl VerificationEngine {
    pub fn new(parts: EngineParts) -> Self {
        Self {
            nlp: parts.nlp,
            classifier: parts.classifier,
            evidence: parts.evidence,
            fusion: FusionEngine::new(parts.scoring, parts.domains),
            history: parts.history,
        }
    }

    pub fn fusion(&self) -> &FusionEngine {
        &self.fusion
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn similarity_strategy(&self) -> &'static str {
        self.evidence.similarity().strategy_name()
    }

    /// Verifies `text`. Only classifier failures are errors: evidence problems
    /// degrade to the fallback score and history problems are logged.
    pub async fn run_verification(
        &self,
        text: &str,
        input_type: InputType,
        source_domain: Option<&str>,
    ) -> Result<VerificationResult, VerificationError> {
        if text.trim().is_empty() {
            return Err(VerificationError::EmptyInput);
        }
        let started = Instant::now();

        let analysis = self.nlp.analyze(text);
        let layer1 = self.classify(text, &analysis).await?;

        let claim = if analysis.claim.claim.is_empty() {
            text.trim().to_string()
        } else {
            analysis.claim.claim.clone()
        };
        let entity_names: Vec<String> = analysis.entities.names().map(str::to_string).collect();
        let fallback_score = self.fusion.fallback_evidence_score(source_domain);
        let layer2 = self
            .evidence
            .evaluate(&claim, &entity_names, fallback_score)
            .await;

        let outcome = self.fusion.fuse(&layer1, layer2.evidence_score, source_domain);
        let confidence = round_to(layer1.confidence.max(layer2.evidence_score), 1);

        let result = VerificationResult {
            verdict: outcome.verdict,
            confidence,
            final_score: outcome.final_score,
            layer1,
            layer2,
            entities: analysis.entities,
            sentiment: analysis.sentiment.sentiment.as_str().to_string(),
            emotion: analysis.sentiment.emotion.as_str().to_string(),
            language: analysis.language.language,
            domain_credibility: outcome.domain,
            domain_adjustment: outcome.adjustment,
            input_type,
            processing_time_ms: round_to(started.elapsed().as_secs_f64() * 1000.0, 1),
        };

        self.record(&result, text).await;

        info!(
            verdict = %result.verdict,
            final_score = result.final_score,
            ml_credibility = outcome.ml_credibility,
            evidence_score = result.layer2.evidence_score,
            sources = result.layer2.sources.len(),
            input_type = %input_type,
            elapsed_ms = result.processing_time_ms,
            "Verification complete"
        );
        Ok(result)
    }

    /// Runs the classifier on the cleaned text (raw text if cleaning empties it) and
    /// appends NLP-derived features.
    async fn classify(
        &self,
        text: &str,
        analysis: &NlpAnalysis,
    ) -> Result<Layer1Result, VerificationError> {
        let input = if analysis.preprocessed.cleaned.is_empty() {
            text.to_string()
        } else {
            analysis.preprocessed.cleaned.clone()
        };

        let classifier = Arc::clone(&self.classifier);
        let mut layer1 = tokio::task::spawn_blocking(move || classifier.predict(&input))
            .await
            .map_err(|e| VerificationError::Internal {
                reason: e.to_string(),
            })??;

        if analysis.clickbait.is_clickbait {
            layer1.triggered_features.extend(
                analysis
                    .clickbait
                    .triggered_patterns
                    .iter()
                    .take(CLICKBAIT_FEATURES)
                    .cloned(),
            );
        }
        if analysis.sentiment.sentiment == Sentiment::HighNegative {
            layer1
                .triggered_features
                .push(HIGH_EMOTION_FEATURE.to_string());
        }

        debug!(
            classifier = self.classifier.name(),
            verdict = %layer1.verdict,
            confidence = layer1.confidence,
            features = layer1.triggered_features.len(),
            "Layer 1 complete"
        );
        Ok(layer1)
    }

    async fn record(&self, result: &VerificationResult, text: &str) {
        let Some(history) = &self.history else {
            return;
        };
        let entry = HistoryEntry::from_result(result, text);
        let id = entry.id.clone();
        if let Err(e) = history.record(entry).await {
            warn!(id = %id, error = %e, "Failed to record verification history");
        }
    }
}
