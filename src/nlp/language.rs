//! Tagalog / English / Taglish detection from function-word ratios.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::round_to;
use crate::scoring::Language;

const TAGALOG_MARKERS: &[&str] = &[
    "ang", "ng", "na", "sa", "at", "ay", "mga", "ni", "nang", "si", "ko", "mo", "siya", "kami",
    "kayo", "sila", "ito", "raw", "daw", "ba", "po", "din", "rin", "naman", "lang", "kaya",
    "dahil", "kung", "pero", "kapag", "talaga", "pala", "sana", "grabe", "wala", "hindi", "may",
    "mayroon", "bakit", "paano", "kailan", "nasaan", "sino",
];

const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "is", "are", "was", "were", "this", "that", "with", "from", "have", "has",
    "had", "will", "would", "could", "should", "not", "been", "being", "they", "their", "there",
];

/// Marker ratio that makes one language dominant.
const DOMINANT_RATIO: f64 = 0.25;
/// The other language must stay below this for a single-language verdict.
const MINOR_RATIO: f64 = 0.15;
/// Both ratios at or above this → Taglish.
const MIXED_RATIO: f64 = 0.10;
/// Confidence for code-switched text with too few markers to call.
const UNCERTAIN_CONFIDENCE: f64 = 0.4;
/// Inputs shorter than this (trimmed) are not classified.
const MIN_CHARS: usize = 5;

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\w+\b").ok());

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageResult {
    pub language: Language,
    pub confidence: f64,
    pub tagalog_ratio: f64,
    pub english_ratio: f64,
}

impl LanguageResult {
    fn unknown() -> Self {
        Self {
            language: Language::Unknown,
            confidence: 0.0,
            tagalog_ratio: 0.0,
            english_ratio: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, text: &str) -> LanguageResult {
        if text.trim().chars().count() < MIN_CHARS {
            return LanguageResult::unknown();
        }

        let lower = text.to_lowercase();
        let tokens: Vec<&str> = match WORD.as_ref() {
            Some(re) => re.find_iter(&lower).map(|m| m.as_str()).collect(),
            None => lower.split_whitespace().collect(),
        };
        if tokens.is_empty() {
            return LanguageResult::unknown();
        }

        let total = tokens.len() as f64;
        let tl_hits = tokens.iter().filter(|t| TAGALOG_MARKERS.contains(t)).count();
        let en_hits = tokens.iter().filter(|t| ENGLISH_MARKERS.contains(t)).count();
        let tl = tl_hits as f64 / total;
        let en = en_hits as f64 / total;

        let (language, confidence) = if tl >= DOMINANT_RATIO && en < MINOR_RATIO {
            (Language::Tagalog, tl)
        } else if en >= DOMINANT_RATIO && tl < MINOR_RATIO {
            (Language::English, en)
        } else if tl >= MIXED_RATIO && en >= MIXED_RATIO {
            (Language::Taglish, (tl + en) / 2.0)
        } else {
            (Language::Taglish, UNCERTAIN_CONFIDENCE)
        };

        LanguageResult {
            language,
            confidence: round_to(confidence.min(1.0), 3),
            tagalog_ratio: round_to(tl, 3),
            english_ratio: round_to(en, 3),
        }
    }
}
