//! Claim ↔ evidence relatedness in `[0, 1]`.
//!
//! The strategy is fixed when the scorer is built: an embedding model if one loads,
//! token Jaccard otherwise. A runtime inference error on the embedding path falls
//! back to Jaccard for that call only.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::types::EvidenceArticle;
use crate::constants::{EVIDENCE_CHAR_BUDGET, SIMILARITY_PRECISION, round_to, truncate_chars};
use crate::embedding::{EmbedderConfig, EmbeddingError, SentenceEmbedder, cosine_similarity};

/// A way of scoring two non-empty strings.
pub trait SimilarityStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Raw relatedness; the caller clamps and rounds.
    fn score(&self, claim: &str, text: &str) -> f64;
}

/// `|A ∩ B| / |A ∪ B|` over lowercase whitespace tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaccardSimilarity;

impl SimilarityStrategy for JaccardSimilarity {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn score(&self, claim: &str, text: &str) -> f64 {
        jaccard(claim, text)
    }
}

pub fn jaccard(a: &str, b: &str) -> f64 {
    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    let tokens_a: HashSet<&str> = lower_a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = lower_b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Cosine similarity of sentence embeddings.
#[derive(Debug)]
pub struct EmbeddingSimilarity {
    embedder: Arc<SentenceEmbedder>,
}

impl EmbeddingSimilarity {
    pub fn new(embedder: Arc<SentenceEmbedder>) -> Self {
        Self { embedder }
    }

    fn try_score(&self, claim: &str, text: &str) -> Result<f64, EmbeddingError> {
        let claim_vec = self.embedder.embed(claim)?;
        let text_vec = self
            .embedder
            .embed(truncate_chars(text, EVIDENCE_CHAR_BUDGET))?;
        Ok(cosine_similarity(&claim_vec, &text_vec) as f64)
    }
}

impl SimilarityStrategy for EmbeddingSimilarity {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn score(&self, claim: &str, text: &str) -> f64 {
        match self.try_score(claim, text) {
            Ok(score) => score,
            Err(e) => {
                warn!(error = %e, "Embedding similarity failed, falling back to Jaccard");
                jaccard(claim, text)
            }
        }
    }
}

/// Bounded similarity scorer shared across requests.
#[derive(Clone)]
pub struct SimilarityScorer {
    strategy: Arc<dyn SimilarityStrategy>,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::jaccard()
    }
}

impl SimilarityScorer {
    pub fn new(strategy: Arc<dyn SimilarityStrategy>) -> Self {
        Self { strategy }
    }

    pub fn jaccard() -> Self {
        Self::new(Arc::new(JaccardSimilarity))
    }

    pub fn with_embedder(embedder: Arc<SentenceEmbedder>) -> Self {
        Self::new(Arc::new(EmbeddingSimilarity::new(embedder)))
    }

    /// Loads the embedding model if configured; otherwise (or on load failure) Jaccard.
    pub fn probe(config: &EmbedderConfig) -> Self {
        if !config.testing_stub && !config.model_available() {
            info!("No embedding model configured, using Jaccard similarity");
            return Self::jaccard();
        }

        match SentenceEmbedder::load(config.clone()) {
            Ok(embedder) => {
                info!(?embedder, "Embedding similarity enabled");
                Self::with_embedder(Arc::new(embedder))
            }
            Err(e) => {
                warn!(error = %e, "Embedding model unavailable, using Jaccard similarity");
                Self::jaccard()
            }
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Relatedness in `[0, 1]`, rounded to 4 places. Empty input scores 0.
    pub fn score(&self, claim: &str, text: &str) -> f64 {
        if claim.trim().is_empty() || text.trim().is_empty() {
            return 0.0;
        }

        let raw = self.strategy.score(claim, text);
        if raw.is_nan() {
            return 0.0;
        }
        round_to(raw.clamp(0.0, 1.0), SIMILARITY_PRECISION)
    }

    /// Scores each article's `title + description` and sorts descending (stable on ties).
    pub fn rank_by_similarity(
        &self,
        claim: &str,
        articles: Vec<EvidenceArticle>,
    ) -> Vec<(EvidenceArticle, f64)> {
        let mut scored: Vec<(EvidenceArticle, f64)> = articles
            .into_iter()
            .map(|article| {
                let similarity = self.score(claim, &article.text());
                (article, similarity)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }
}
