use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Classifier, ClassifierError};
use crate::scoring::{Layer1Result, Verdict};

/// Returns a fixed result (or always fails) and counts calls.
#[derive(Debug)]
pub struct MockClassifier {
    result: Option<Layer1Result>,
    calls: AtomicUsize,
}

impl MockClassifier {
    pub fn returning(verdict: Verdict, confidence: f64) -> Self {
        Self {
            result: Some(Layer1Result {
                verdict,
                confidence,
                triggered_features: Vec::new(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_features(mut self, features: &[&str]) -> Self {
        if let Some(result) = self.result.as_mut() {
            result.triggered_features = features.iter().map(|f| f.to_string()).collect();
        }
        self
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for MockClassifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn predict(&self, text: &str) -> Result<Layer1Result, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }
        self.result.clone().ok_or(ClassifierError::NoOutput)
    }
}
