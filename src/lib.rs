//! PhilVerify library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Pipeline
//! - [`VerificationEngine`], [`EngineParts`] - One verification end to end
//! - [`FusionEngine`], [`ScoringConfig`] - Layer 1 / Layer 2 / source-tier fusion
//! - [`EvidencePipeline`], [`SimilarityScorer`], [`StanceClassifier`], [`aggregate`] - Layer 2
//! - [`Classifier`], [`LexiconClassifier`], [`SequenceClassifier`] - Layer 1
//! - [`NlpAnalyzer`] - Preprocessing, language, entities, sentiment, clickbait, claim
//!
//! ## Collaborators
//! - [`DomainCredibility`], [`DomainTier`], [`extract_domain`] - Publisher tiers
//! - [`EvidenceFetcher`], [`GoogleNewsRss`], [`NewsApi`] - Evidence retrieval
//! - [`SentenceEmbedder`] - Candle BERT sentence embeddings
//! - [`UrlScraper`], [`TextExtractor`] - Article text extraction
//! - [`JsonlHistory`], [`HistoryStore`] - History log, listings, trends
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod domain;
pub mod embedding;
pub mod evidence;
pub mod extract;
pub mod gateway;
pub mod hashing;
pub mod history;
pub mod nlp;
pub mod scoring;

pub use classifier::{
    Classifier, ClassifierConfig, ClassifierError, LexiconClassifier, SequenceClassifier,
    load_classifier,
};
#[cfg(any(test, feature = "mock"))]
pub use classifier::MockClassifier;

pub use config::{Config, ConfigError};
pub use constants::{NEUTRAL_EVIDENCE_SCORE, bounded_score, round_to};
pub use domain::{DomainCredibility, DomainError, DomainResult, DomainTier, extract_domain};
pub use embedding::{EmbedderConfig, EmbeddingError, SentenceEmbedder, cosine_similarity};

pub use evidence::{
    EvidenceArticle, EvidenceConfig, EvidenceFetcher, EvidencePipeline, EvidenceRetriever,
    EvidenceSource, FetchError, GoogleNewsRss, Layer2Result, NewsApi, NewsSource,
    SimilarityScorer, Stance, StanceClassifier, StanceResult, aggregate,
};
#[cfg(any(test, feature = "mock"))]
pub use evidence::mock::{MockNewsSource, MockRetriever};

pub use extract::{ExtractError, Extracted, TextExtractor, UrlScraper};
#[cfg(any(test, feature = "mock"))]
pub use extract::StaticExtractor;

pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use hashing::{claim_key_hex, evidence_key, hash_claim, normalize_claim};
pub use history::{
    HistoryEntry, HistoryError, HistoryPage, HistoryQuery, HistoryStore, JsonlHistory,
    TrendsQuery, TrendsReport,
};
pub use nlp::{NlpAnalysis, NlpAnalyzer};
pub use scoring::{
    EngineParts, FusionEngine, FusionOutcome, InputType, Layer1Result, ScoringConfig,
    VerificationEngine, VerificationError, VerificationResult, Verdict,
};
