//! Layer 2: evidence retrieval and stance aggregation.
//!
//! A claim is sent to the configured news sources ([`EvidenceFetcher`]), each
//! returned article is scored for relatedness ([`SimilarityScorer`]) and stance
//! ([`StanceClassifier`]), and the stances are folded into an evidence score
//! ([`aggregate`]).
//!
//! Retrieval failures never surface here: they are logged and the layer reports no
//! sources together with the caller-supplied fallback score.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod similarity;
pub mod sources;
pub mod stance;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use aggregate::aggregate;
pub use cache::EvidenceCache;
pub use config::EvidenceConfig;
pub use error::FetchError;
pub use fetcher::{EvidenceFetcher, EvidenceRetriever, merge_articles};
pub use similarity::{
    EmbeddingSimilarity, JaccardSimilarity, SimilarityScorer, SimilarityStrategy, jaccard,
};
pub use sources::{GoogleNewsRss, NewsApi, NewsSource, build_query};
pub use stance::StanceClassifier;
pub use types::{EvidenceArticle, EvidenceSource, Layer2Result, Stance, StanceResult};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::DomainCredibility;
use crate::scoring::Verdict;

/// Retrieval + scoring for one claim.
#[derive(Clone)]
pub struct EvidencePipeline {
    retriever: Arc<dyn EvidenceRetriever>,
    similarity: SimilarityScorer,
    stance: StanceClassifier,
    domains: Arc<DomainCredibility>,
    max_results: usize,
}

impl std::fmt::Debug for EvidencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidencePipeline")
            .field("similarity", &self.similarity)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl EvidencePipeline {
    pub fn new(
        retriever: Arc<dyn EvidenceRetriever>,
        similarity: SimilarityScorer,
        domains: Arc<DomainCredibility>,
        max_results: usize,
    ) -> Self {
        Self {
            retriever,
            similarity,
            stance: StanceClassifier::new(),
            domains,
            max_results,
        }
    }

    pub fn similarity(&self) -> &SimilarityScorer {
        &self.similarity
    }

    /// Ranks, stance-labels, and annotates retrieved articles.
    pub fn score_articles(
        &self,
        claim: &str,
        articles: Vec<EvidenceArticle>,
    ) -> (Vec<EvidenceSource>, Vec<StanceResult>) {
        let ranked = self.similarity.rank_by_similarity(claim, articles);

        let mut sources = Vec::with_capacity(ranked.len());
        let mut stances = Vec::with_capacity(ranked.len());
        for (article, similarity) in ranked {
            let stance = self.stance.detect_article(claim, &article, similarity);
            let domain_tier = self.domains.tier_of(&article.domain());
            sources.push(EvidenceSource {
                title: article.title,
                url: article.url,
                similarity,
                stance: stance.stance,
                stance_reason: stance.reason.clone(),
                domain_tier,
                published_at: article.published_at,
                source_name: article.source_name,
            });
            stances.push(stance);
        }

        (sources, stances)
    }

    /// Runs Layer 2. With no articles the result carries `fallback_score` and an
    /// `Unverified` verdict.
    pub async fn evaluate(
        &self,
        claim: &str,
        entities: &[String],
        fallback_score: f64,
    ) -> Layer2Result {
        let no_evidence = || Layer2Result {
            verdict: Verdict::Unverified,
            evidence_score: fallback_score,
            sources: Vec::new(),
            claim_used: claim.to_string(),
        };

        let articles = self
            .retriever
            .fetch_evidence(claim, entities, self.max_results)
            .await;
        if articles.is_empty() {
            debug!(fallback_score, "No evidence articles, using fallback score");
            return no_evidence();
        }

        let pipeline = self.clone();
        let owned_claim = claim.to_string();
        let scored = tokio::task::spawn_blocking(move || {
            pipeline.score_articles(&owned_claim, articles)
        })
        .await;

        let (sources, stances) = match scored {
            Ok(scored) => scored,
            Err(e) => {
                warn!(error = %e, "Evidence scoring task failed");
                return no_evidence();
            }
        };

        let similarities: Vec<f64> = sources.iter().map(|s| s.similarity).collect();
        let (evidence_score, verdict) = aggregate(&stances, &similarities);
        debug!(
            sources = sources.len(),
            evidence_score,
            verdict = %verdict,
            "Evidence aggregated"
        );

        Layer2Result {
            verdict,
            evidence_score,
            sources,
            claim_used: claim.to_string(),
        }
    }
}
