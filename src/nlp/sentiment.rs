//! Lexicon sentiment and dominant emotion.

use std::collections::HashSet;

use serde::Serialize;

use crate::constants::round_to;

const NEGATIVE_WORDS: &[&str] = &[
    "fake", "false", "lie", "liar", "hoax", "scam", "fraud", "corrupt", "criminal", "illegal",
    "murder", "die", "death", "dead", "kill", "patay", "namatay", "peke", "sinungaling",
    "magnanakaw", "kasamaan", "krimen", "karahasan", "pandemic", "sakit", "epidemya", "grabe",
    "nakakatakot", "nakakainis", "nakakagalit", "kahiya",
];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "positive", "success", "win",
    "victory", "help", "support", "safe", "free", "maganda", "magaling", "mahusay", "maayos",
    "tagumpay", "ligtas", "masaya", "mabuti", "mahalaga", "mahal", "salamat", "pagbabago",
];

const FEAR_WORDS: &[&str] = &[
    "takot", "fear", "scared", "afraid", "terror", "danger", "dangerous", "banta", "panganib",
    "nakakatakot", "kalamidad", "lindol",
];

const ANGER_WORDS: &[&str] = &[
    "galit", "angry", "anger", "furious", "rage", "outrage", "poot", "nakakagalit",
    "nakakaasar", "sumpain", "putang", "gago",
];

/// Polarity beyond this is positive/negative.
const POLAR_THRESHOLD: f64 = 0.3;
/// Polarity beyond this is "high" positive/negative.
const HIGH_THRESHOLD: f64 = 0.6;
/// Scales hit density into an emotion score.
const EMOTION_GAIN: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    #[serde(rename = "high positive")]
    HighPositive,
    Positive,
    Neutral,
    Negative,
    #[serde(rename = "high negative")]
    HighNegative,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::HighPositive => "high positive",
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::HighNegative => "high negative",
        }
    }

    fn from_polarity(score: f64) -> Self {
        if score > HIGH_THRESHOLD {
            Sentiment::HighPositive
        } else if score > POLAR_THRESHOLD {
            Sentiment::Positive
        } else if score < -HIGH_THRESHOLD {
            Sentiment::HighNegative
        } else if score < -POLAR_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Fear,
    Joy,
    Sadness,
    Neutral,
}

impl Emotion {
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// −1.0 to 1.0.
    pub sentiment_score: f64,
    pub emotion: Emotion,
    /// 0.0 to 1.0.
    pub emotion_score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        let lower = text.to_lowercase();
        let words: HashSet<&str> = lower.split_whitespace().collect();
        let hits = |lexicon: &[&str]| words.iter().filter(|w| lexicon.contains(w)).count();

        let neg = hits(NEGATIVE_WORDS);
        let pos = hits(POSITIVE_WORDS);
        let fear = hits(FEAR_WORDS);
        let anger = hits(ANGER_WORDS);

        let score = if pos + neg == 0 {
            0.0
        } else {
            (pos as f64 - neg as f64) / (pos + neg) as f64
        };

        let density =
            |count: usize| (count as f64 / words.len().max(1) as f64 * EMOTION_GAIN).min(1.0);
        let (emotion, emotion_score) = if fear > anger {
            (Emotion::Fear, density(fear))
        } else if anger > 0 {
            (Emotion::Anger, density(anger))
        } else if pos > neg {
            (Emotion::Joy, density(pos))
        } else if neg > 0 {
            (Emotion::Sadness, density(neg))
        } else {
            (Emotion::Neutral, 0.0)
        };

        SentimentResult {
            sentiment: Sentiment::from_polarity(score),
            sentiment_score: round_to(score, 3),
            emotion,
            emotion_score: round_to(emotion_score, 3),
        }
    }
}
