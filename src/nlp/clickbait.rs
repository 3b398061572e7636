//! Clickbait signals common in Philippine viral posts.
//!
//! Each triggered feature adds a fixed weight; the sum is capped at 1.0 and the
//! text counts as clickbait from [`CLICKBAIT_THRESHOLD`] up.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::round_to;

pub const CLICKBAIT_THRESHOLD: f64 = 0.4;

const PHRASES: &[&str] = &[
    r"\byou won'?t believe\b",
    r"\bshocking\b",
    r"\bviral\b",
    r"\bbreaking\b",
    r"\bexclusive\b",
    r"\bmust[\s-]?see\b",
    r"\bsecret\b",
    r"\bconfirmed\b",
    r"\bexposed\b",
    r"\bscandal\b",
    r"\bunbelievable\b",
    r"\bmiraculous?\b",
    r"\bhoax\b",
    r"\bfact[\s-]?check\b",
    r"\bthis is why\b",
    r"\bwatch this\b",
    r"\bgrabe\b",
    r"\bwow\b",
    r"\bsurprise\b",
    r"\btrending\b",
    r"\bselo\b",
    r"\bbalita\b",
    r"\bnatuklasan\b",
    r"\bnahuli\b",
    r"\bsikat\b",
    r"\bpakinggan\b",
    r"\bpanoorin\b",
    r"\bkumpirmado\b",
    r"\bkatotohanan\b",
];

const CAPS_WEIGHT: f64 = 0.20;
const PUNCT_WEIGHT: f64 = 0.20;
const NUMBER_BAIT_WEIGHT: f64 = 0.15;
const QUESTION_BAIT_WEIGHT: f64 = 0.10;
const LENGTH_WEIGHT: f64 = 0.05;
const PHRASE_WEIGHT: f64 = 0.25;

const SHORT_TITLE_WORDS: usize = 5;
const LONG_TITLE_WORDS: usize = 30;

static CAPS_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").ok());
static EXCESSIVE_PUNCT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[!?]{2,}").ok());
static NUMBER_BAIT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\s+(?:reasons?|things?|ways?|tips?|signs?|bagay)\b").ok()
});
static QUESTION_BAIT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:ano|bakit|paano|kailan|sino|saan)\b.*\?").ok());
static PHRASE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PHRASES
        .iter()
        .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
        .collect()
});

fn is_match(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickbaitResult {
    pub is_clickbait: bool,
    /// 0.0–1.0.
    pub score: f64,
    pub triggered_patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClickbaitDetector;

impl ClickbaitDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, text: &str) -> ClickbaitResult {
        let mut triggered = Vec::new();
        let mut score = 0.0_f64;

        let caps: Vec<&str> = match CAPS_WORD.as_ref() {
            Some(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
            None => Vec::new(),
        };
        if caps.len() >= 2 {
            let shown: Vec<&str> = caps.iter().take(3).copied().collect();
            triggered.push(format!("all_caps_words: {}", shown.join(", ")));
            score += CAPS_WEIGHT;
        }

        if is_match(&EXCESSIVE_PUNCT, text) {
            triggered.push("excessive_punctuation".to_string());
            score += PUNCT_WEIGHT;
        }

        if is_match(&NUMBER_BAIT, text) {
            triggered.push("number_bait".to_string());
            score += NUMBER_BAIT_WEIGHT;
        }

        if is_match(&QUESTION_BAIT, text) {
            triggered.push("question_bait".to_string());
            score += QUESTION_BAIT_WEIGHT;
        }

        let words = text.split_whitespace().count();
        if words < SHORT_TITLE_WORDS {
            triggered.push("title_too_short".to_string());
            score += LENGTH_WEIGHT;
        } else if words > LONG_TITLE_WORDS {
            triggered.push("title_very_long".to_string());
            score += LENGTH_WEIGHT;
        }

        for re in PHRASE_PATTERNS.iter() {
            if let Some(m) = re.find(text) {
                triggered.push(format!("clickbait_phrase: '{}'", m.as_str()));
                score += PHRASE_WEIGHT;
            }
        }

        let score = score.min(1.0);
        ClickbaitResult {
            is_clickbait: score >= CLICKBAIT_THRESHOLD,
            score: round_to(score, 3),
            triggered_patterns: triggered,
        }
    }
}
