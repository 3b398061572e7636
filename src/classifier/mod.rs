//! Layer 1: text classification into a verdict with a 0–100 confidence.
//!
//! Two implementations sit behind [`Classifier`]: a fine-tuned BERT-family
//! [`SequenceClassifier`] and the keyword [`LexiconClassifier`] used when no model
//! is configured. [`load_classifier`] picks one at startup.

pub mod config;
pub mod error;
pub mod lexicon;
pub mod model;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use config::{ClassifierConfig, DEFAULT_CLASSIFIER_MAX_SEQ_LEN};
pub use error::ClassifierError;
pub use lexicon::{LexiconClassifier, signal_phrases};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockClassifier;
pub use model::{SequenceClassifier, verdict_for_label};

use std::sync::Arc;

use tracing::{info, warn};

use crate::constants::round_to;
use crate::embedding::device::select_device;
use crate::scoring::{Layer1Result, Verdict};

/// Class index order shared by every classifier.
pub const CLASS_ORDER: [Verdict; 3] = [Verdict::Credible, Verdict::Unverified, Verdict::LikelyFake];

/// A Layer-1 classifier. Calls are CPU-bound; async callers should run them on a
/// blocking thread.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Empty or whitespace-only text is [`ClassifierError::EmptyInput`].
    fn predict(&self, text: &str) -> Result<Layer1Result, ClassifierError>;
}

/// Loads the configured model, falling back to the lexicon baseline when none is
/// configured or it fails to load.
pub fn load_classifier(config: &ClassifierConfig) -> Arc<dyn Classifier> {
    if config.model_dir.is_none() {
        info!("No classifier model configured, using lexicon baseline");
        return Arc::new(LexiconClassifier::new());
    }

    let loaded = select_device()
        .map_err(ClassifierError::from)
        .and_then(|device| SequenceClassifier::load(config, &device));
    match loaded {
        Ok(model) => Arc::new(model),
        Err(e) => {
            warn!(error = %e, "Classifier model unavailable, using lexicon baseline");
            Arc::new(LexiconClassifier::new())
        }
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the most probable class (first wins on ties) and its probability as a
/// percentage rounded to one decimal.
pub fn top_class(probs: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in probs.iter().enumerate() {
        if p.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, b)| p > b) {
            best = Some((i, p));
        }
    }
    best.map(|(i, p)| (i, round_to(p * 100.0, 1)))
}
