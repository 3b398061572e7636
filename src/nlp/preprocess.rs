//! Cleaning and tokenisation for English / Tagalog / Taglish posts.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

const TAGALOG_STOPWORDS: &[&str] = &[
    "ang", "ng", "na", "sa", "at", "ay", "mga", "ni", "nang", "si", "ko", "mo", "siya", "kami",
    "kayo", "sila", "ito", "iyon", "iyan", "dito", "doon", "diyan", "nito", "noon", "niyan",
    "rin", "din", "pa", "lang", "lamang", "nga", "naman", "kaya", "pero", "dahil", "kung",
    "kapag", "habang", "bilang", "upang", "para", "mula", "hanggang", "ayon", "sinabi", "raw",
    "daw", "ba", "po", "ho", "oh", "oo", "hindi", "wala", "may", "mayroon", "talaga", "pala",
    "sana",
];

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "could", "should", "may", "might", "shall", "can", "not",
    "no", "nor", "so", "yet", "both", "either", "neither", "this", "that", "these", "those",
    "it", "its", "i", "me", "my", "we", "our", "you", "your", "they", "their", "he", "his",
    "she", "her",
];

static HTML_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]+>").ok());
static URL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"https?://\S+").ok());
static MENTION: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"@\w+").ok());
static HASHTAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"#(\w+)").ok());
static EMOJI: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[\p{So}\p{Mn}]").ok());
static PUNCT_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"([!?.])[!?.]+").ok());

fn replace_all(pattern: &LazyLock<Option<Regex>>, text: &str, with: &str) -> String {
    match pattern.as_ref() {
        Some(re) => re.replace_all(text, with).into_owned(),
        None => text.to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `true` for EN or TL stopwords. Expects lowercase input.
pub fn is_stopword(token: &str) -> bool {
    TAGALOG_STOPWORDS.contains(&token) || ENGLISH_STOPWORDS.contains(&token)
}

/// Every stage of [`Preprocessor::preprocess`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preprocessed {
    pub original: String,
    pub cleaned: String,
    pub normalized: String,
    pub tokens: Vec<String>,
    pub filtered_tokens: Vec<String>,
    pub char_count: usize,
    pub word_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Removes markup, links, mentions, `#` marks, and emoji, then lowercases.
    pub fn clean(&self, text: &str) -> String {
        let text = replace_all(&HTML_TAG, text, " ");
        let text = replace_all(&URL, &text, " ");
        let text = replace_all(&MENTION, &text, " ");
        let text = replace_all(&HASHTAG, &text, "$1");
        let text = replace_all(&EMOJI, &text, "");
        collapse_whitespace(&text.to_lowercase())
    }

    /// Shortens character runs ("graaabe" → "graabe"), squeezes `!?.` runs to one
    /// mark, and turns ASCII punctuation other than `'` into spaces.
    pub fn normalize(&self, text: &str) -> String {
        let squeezed = squeeze_repeats(text);
        let squeezed = replace_all(&PUNCT_RUN, &squeezed, "$1");
        let spaced: String = squeezed
            .chars()
            .map(|c| {
                if c.is_ascii_punctuation() && c != '\'' {
                    ' '
                } else {
                    c
                }
            })
            .collect();
        collapse_whitespace(&spaced)
    }

    /// Whitespace split, dropping single-character tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|t| t.chars().count() > 1)
            .map(str::to_string)
            .collect()
    }

    pub fn remove_stopwords(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !is_stopword(t))
            .cloned()
            .collect()
    }

    pub fn preprocess(&self, text: &str) -> Preprocessed {
        let cleaned = self.clean(text);
        let normalized = self.normalize(&cleaned);
        let tokens = self.tokenize(&normalized);
        let filtered_tokens = self.remove_stopwords(&tokens);
        Preprocessed {
            original: text.to_string(),
            char_count: normalized.chars().count(),
            word_count: tokens.len(),
            cleaned,
            normalized,
            tokens,
            filtered_tokens,
        }
    }
}

/// Caps runs of three or more identical characters at two.
fn squeeze_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}
