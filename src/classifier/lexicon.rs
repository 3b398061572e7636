//! Keyword baseline for when no fine-tuned model is configured.
//!
//! Three phrase lexicons (fake, unverified, credible) add weight to one logit each.
//! The logits go through a softmax and the winning class becomes the verdict.

use std::sync::LazyLock;

use regex::Regex;

use super::{CLASS_ORDER, Classifier, ClassifierError, softmax, top_class};
use crate::scoring::Layer1Result;

/// Prior on the unverified logit, so text with no signals leans Unverified.
const UNVERIFIED_PRIOR: f64 = 0.3;

/// Most triggered phrases reported per prediction.
const MAX_FEATURES: usize = 5;

const FAKE_SIGNALS: &[(&str, f64)] = &[
    ("totoo ba", 1.2),
    ("100% totoo", 1.5),
    ("shocking truth", 1.5),
    ("doctors don't want you to know", 1.8),
    ("big pharma", 1.2),
    ("microchip", 1.2),
    ("secretly", 0.9),
    ("suppressed", 0.9),
    ("exposed", 0.8),
    ("cure", 0.7),
    ("namatay daw", 1.2),
    ("katotohanan", 0.8),
    ("grabe", 0.8),
    ("libreng", 0.6),
    ("full video", 0.7),
    ("share before", 1.2),
    ("ikalat", 1.0),
    ("hoax", 0.6),
];

const UNVERIFIED_SIGNALS: &[(&str, f64)] = &[
    ("claim", 0.8),
    ("rumor", 1.0),
    ("alleged", 0.9),
    ("allegedly", 0.9),
    ("unconfirmed", 1.1),
    ("anonymous source", 1.1),
    ("source says", 1.0),
    ("according to residents", 0.8),
    ("reportedly", 0.7),
    ("umano", 0.9),
    ("daw", 0.5),
    ("raw", 0.4),
    ("viral", 0.7),
    ("spotted", 0.6),
    ("breaking", 0.5),
];

const CREDIBLE_SIGNALS: &[(&str, f64)] = &[
    ("rappler", 1.0),
    ("inquirer", 1.0),
    ("gma news", 1.0),
    ("abs-cbn news", 1.0),
    ("philstar", 1.0),
    ("philippine star", 1.0),
    ("manila bulletin", 1.0),
    ("reports", 0.6),
    ("confirms", 0.6),
    ("approved", 0.6),
    ("upholds", 0.7),
    ("signs", 0.5),
    ("passes", 0.6),
    ("according to data", 0.8),
    ("percent", 0.4),
    ("doh", 0.4),
    ("dof", 0.4),
    ("dswd", 0.4),
    ("pnp", 0.4),
    ("bsp", 0.5),
    ("comelec", 0.4),
    ("senate", 0.3),
    ("supreme court", 0.5),
];

struct Signal {
    phrase: &'static str,
    weight: f64,
    class: usize,
    pattern: Regex,
}

static SIGNALS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    [
        (CREDIBLE_SIGNALS, 0),
        (UNVERIFIED_SIGNALS, 1),
        (FAKE_SIGNALS, 2),
    ]
    .into_iter()
    .flat_map(|(lexicon, class)| {
        lexicon.iter().filter_map(move |&(phrase, weight)| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase)))
                .ok()
                .map(|pattern| Signal {
                    phrase,
                    weight,
                    class,
                    pattern,
                })
        })
    })
    .collect()
});

/// Phrases from any lexicon found in `text`, heaviest first.
pub fn signal_phrases(text: &str) -> Vec<String> {
    let mut hits: Vec<(&'static str, f64)> = SIGNALS
        .iter()
        .filter(|s| s.pattern.is_match(text))
        .map(|s| (s.phrase, s.weight))
        .collect();
    hits.sort_by(|a, b| b.1.total_cmp(&a.1));
    hits.into_iter()
        .take(MAX_FEATURES)
        .map(|(phrase, _)| phrase.to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    fn logits(&self, text: &str) -> [f64; 3] {
        let mut logits = [0.0, UNVERIFIED_PRIOR, 0.0];
        for signal in SIGNALS.iter() {
            if signal.pattern.is_match(text) {
                logits[signal.class] += signal.weight;
            }
        }
        logits
    }
}

impl Classifier for LexiconClassifier {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn predict(&self, text: &str) -> Result<Layer1Result, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let probs = softmax(&self.logits(text));
        let (index, confidence) = top_class(&probs).ok_or(ClassifierError::NoOutput)?;

        Ok(Layer1Result {
            verdict: CLASS_ORDER[index],
            confidence,
            triggered_features: signal_phrases(text),
        })
    }
}
