//! Gazetteer-based entity hints for Philippine news.

use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::EntitiesResult;

const PERSON_HINTS: &[&str] = &[
    "marcos", "duterte", "aquino", "robredo", "lacson", "pingping", "bongbong", "sara",
    "panelo", "roque", "calida", "ano", "teodoro",
];

const ORG_HINTS: &[&str] = &[
    "doh", "deped", "dilg", "dfa", "dof", "dswd", "ched", "nbi", "pnp", "afp", "comelec",
    "sandiganbayan", "ombudsman", "pcso", "pagcor", "senate", "congress", "supreme court",
    "malacanang",
];

const LOCATION_HINTS: &[&str] = &[
    "manila", "quezon city", "makati", "pasig", "taguig", "cebu", "davao", "mindanao",
    "luzon", "visayas", "palawan", "boracay", "batangas", "laguna", "cavite", "rizal",
    "bulacan", "pampanga", "metro manila", "ncr", "philippines", "pilipinas",
];

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?i)\b(?:{MONTHS})(?:\s+\d{{1,2}})?,?\s+\d{{4}}\b"),
        r"\b\d{4}-\d{2}-\d{2}\b".to_string(),
        r"\b\d{1,2}/\d{1,2}/\d{2,4}\b".to_string(),
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Compiles each hint as a whole-word, case-insensitive pattern.
fn compile_hints(hints: &'static [&'static str]) -> Vec<(&'static str, Regex)> {
    hints
        .iter()
        .filter_map(|h| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(h)))
                .ok()
                .map(|re| (*h, re))
        })
        .collect()
}

static PERSONS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_hints(PERSON_HINTS));
static ORGS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| compile_hints(ORG_HINTS));
static LOCATIONS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_hints(LOCATION_HINTS));

fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_unique(out: &mut Vec<String>, value: String) {
    if !out.contains(&value) {
        out.push(value);
    }
}

fn matched(
    hints: &[(&'static str, Regex)],
    text: &str,
    render: fn(&str) -> String,
) -> Vec<String> {
    let mut out = Vec::new();
    for (hint, re) in hints {
        if re.is_match(text) {
            push_unique(&mut out, render(hint));
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Persons and locations come back title-cased, organisations upper-cased. Each
    /// list keeps first-seen order without duplicates.
    pub fn extract(&self, text: &str) -> EntitiesResult {
        let mut dates = Vec::new();
        for re in DATE_PATTERNS.iter() {
            for m in re.find_iter(text) {
                push_unique(&mut dates, m.as_str().to_string());
            }
        }

        EntitiesResult {
            persons: matched(&PERSONS, text, title_case),
            organizations: matched(&ORGS, text, str::to_uppercase),
            locations: matched(&LOCATIONS, text, title_case),
            dates,
        }
    }
}
