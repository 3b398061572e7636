//! Picks the falsifiable statement sent to evidence retrieval.

use serde::Serialize;

use crate::constants::truncate_chars;

/// Texts shorter than this are used verbatim.
const PASSTHROUGH_CHARS: usize = 20;
/// Sentences must be longer than this to count as claim candidates.
const MIN_SENTENCE_CHARS: usize = 20;
const MAX_SENTENCES: usize = 2;
/// Fallback prefix length when no sentence qualifies.
const FALLBACK_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimMethod {
    Passthrough,
    SentenceHeuristic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimResult {
    pub claim: String,
    pub method: ClaimMethod,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimExtractor;

impl ClaimExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> ClaimResult {
        let trimmed = text.trim();
        if trimmed.chars().count() < PASSTHROUGH_CHARS {
            return ClaimResult {
                claim: trimmed.to_string(),
                method: ClaimMethod::Passthrough,
            };
        }

        let candidates: Vec<&str> = split_sentences(trimmed)
            .into_iter()
            .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
            .take(MAX_SENTENCES)
            .collect();

        let claim = if candidates.is_empty() {
            truncate_chars(trimmed, FALLBACK_CHARS).trim().to_string()
        } else {
            candidates.join(" ")
        };

        ClaimResult {
            claim,
            method: ClaimMethod::SentenceHeuristic,
        }
    }
}

/// Splits after `.`, `!`, or `?` when followed by whitespace. Pieces are trimmed.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?')
            && let Some(&(next_idx, next)) = chars.peek()
            && next.is_whitespace()
        {
            sentences.push(text[start..idx + c.len_utf8()].trim());
            start = next_idx;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
