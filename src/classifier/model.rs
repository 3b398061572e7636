use candle_core::Device;
use tracing::info;

use super::config::ClassifierConfig;
use super::lexicon::signal_phrases;
use super::{CLASS_ORDER, Classifier, ClassifierError, top_class};
use crate::embedding::BertSequenceClassifier;
use crate::scoring::{Layer1Result, Verdict};

/// Maps a model label (`"Credible"`, `"likely_fake"`, `"LABEL_2"`, ...) to a verdict.
pub fn verdict_for_label(label: &str) -> Option<Verdict> {
    let norm = label.trim().to_ascii_lowercase().replace(['_', '-'], " ");
    match norm.as_str() {
        "credible" | "real" | "true" | "reliable" => Some(Verdict::Credible),
        "unverified" | "uncertain" | "mixed" | "unknown" => Some(Verdict::Unverified),
        "likely fake" | "fake" | "false" | "misinformation" => Some(Verdict::LikelyFake),
        other => other
            .strip_prefix("label ")
            .and_then(|n| n.trim().parse::<usize>().ok())
            .and_then(|i| CLASS_ORDER.get(i).copied()),
    }
}

/// Fine-tuned BERT-family classifier with a linear head over `[CLS]`.
#[derive(Debug, Clone)]
pub struct SequenceClassifier {
    model: BertSequenceClassifier,
    verdicts: Vec<Verdict>,
}

impl SequenceClassifier {
    /// Labels assumed when `config.json` carries no `id2label`.
    pub const DEFAULT_LABELS: [&'static str; 3] = ["Credible", "Unverified", "Likely Fake"];

    pub fn load(config: &ClassifierConfig, device: &Device) -> Result<Self, ClassifierError> {
        let model_dir = config.model_dir.as_deref().ok_or_else(|| {
            ClassifierError::Model(crate::embedding::EmbeddingError::InvalidConfig {
                reason: "classifier model directory is not configured".to_string(),
            })
        })?;

        let model = BertSequenceClassifier::load(
            model_dir,
            &Self::DEFAULT_LABELS,
            config.max_seq_len,
            device,
        )?;
        let verdicts = model
            .labels()
            .iter()
            .map(|label| {
                verdict_for_label(label).ok_or_else(|| ClassifierError::UnknownLabel {
                    label: label.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            model_dir = %model_dir.display(),
            labels = ?model.labels(),
            "Sequence classifier loaded"
        );
        Ok(Self { model, verdicts })
    }
}

impl Classifier for SequenceClassifier {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn predict(&self, text: &str) -> Result<Layer1Result, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let probs: Vec<f64> = self
            .model
            .probabilities(text)?
            .into_iter()
            .map(f64::from)
            .collect();
        let (index, confidence) = top_class(&probs).ok_or(ClassifierError::NoOutput)?;
        let verdict = *self.verdicts.get(index).ok_or(ClassifierError::NoOutput)?;

        Ok(Layer1Result {
            verdict,
            confidence,
            triggered_features: signal_phrases(text),
        })
    }
}
