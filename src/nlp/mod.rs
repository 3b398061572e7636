//! Heuristic text analyzers that run before classification.
//!
//! None of these load models: each is a fixed lexicon or regex table, so they are
//! cheap to construct and safe to share across requests.

pub mod claim;
pub mod clickbait;
pub mod entities;
pub mod language;
pub mod preprocess;
pub mod sentiment;

#[cfg(test)]
mod tests;

pub use claim::{ClaimExtractor, ClaimMethod, ClaimResult};
pub use clickbait::{CLICKBAIT_THRESHOLD, ClickbaitDetector, ClickbaitResult};
pub use entities::EntityExtractor;
pub use language::{LanguageDetector, LanguageResult};
pub use preprocess::{Preprocessed, Preprocessor, is_stopword};
pub use sentiment::{Emotion, Sentiment, SentimentAnalyzer, SentimentResult};

use tracing::debug;

use crate::scoring::EntitiesResult;

/// Everything the analyzers produced for one input.
#[derive(Debug, Clone)]
pub struct NlpAnalysis {
    pub preprocessed: Preprocessed,
    pub language: LanguageResult,
    pub entities: EntitiesResult,
    pub sentiment: SentimentResult,
    pub clickbait: ClickbaitResult,
    pub claim: ClaimResult,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NlpAnalyzer {
    preprocessor: Preprocessor,
    language: LanguageDetector,
    entities: EntityExtractor,
    sentiment: SentimentAnalyzer,
    clickbait: ClickbaitDetector,
    claims: ClaimExtractor,
}

impl NlpAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language, entities, and clickbait read the raw text (case and punctuation
    /// matter to them); sentiment and claim extraction read the cleaned text.
    pub fn analyze(&self, text: &str) -> NlpAnalysis {
        let preprocessed = self.preprocessor.preprocess(text);
        let language = self.language.detect(text);
        let entities = self.entities.extract(text);
        let clickbait = self.clickbait.detect(text);
        let sentiment = self.sentiment.analyze(&preprocessed.cleaned);
        let claim = self.claims.extract(&preprocessed.cleaned);

        debug!(
            language = language.language.as_str(),
            tokens = preprocessed.word_count,
            clickbait_score = clickbait.score,
            sentiment = sentiment.sentiment.as_str(),
            claim_len = claim.claim.len(),
            "NLP analysis complete"
        );

        NlpAnalysis {
            preprocessed,
            language,
            entities,
            sentiment,
            clickbait,
            claim,
        }
    }
}
