//! BERT-family models on candle: a mean-pooled sentence encoder and a sequence
//! classification head.
//!
//! Both load from a Hugging Face style directory holding `config.json`,
//! `model.safetensors`, and `tokenizer.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use tokenizers::Tokenizer;

use super::error::EmbeddingError;
use super::utils::load_tokenizer_with_truncation;

const CONFIG_FILE: &str = "config.json";
const WEIGHTS_FILE: &str = "model.safetensors";

/// Checks the model directory layout and returns `(config_path, weights_path)`.
fn model_files(model_dir: &Path) -> Result<(PathBuf, PathBuf), EmbeddingError> {
    if !model_dir.is_dir() {
        return Err(EmbeddingError::ModelNotFound {
            path: model_dir.to_path_buf(),
        });
    }

    let config_path = model_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Err(EmbeddingError::MissingFile {
            dir: model_dir.to_path_buf(),
            file: CONFIG_FILE,
        });
    }

    let weights_path = model_dir.join(WEIGHTS_FILE);
    if !weights_path.exists() {
        return Err(EmbeddingError::MissingFile {
            dir: model_dir.to_path_buf(),
            file: WEIGHTS_FILE,
        });
    }

    Ok((config_path, weights_path))
}

fn read_config(config_path: &Path) -> Result<(String, Config), EmbeddingError> {
    let raw = std::fs::read_to_string(config_path).map_err(|e| EmbeddingError::ModelLoadFailed {
        reason: format!("failed to read {}: {}", config_path.display(), e),
    })?;
    let config: Config =
        serde_json::from_str(&raw).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to parse {}: {}", config_path.display(), e),
        })?;
    Ok((raw, config))
}

fn var_builder(
    weights_path: &Path,
    device: &Device,
) -> Result<VarBuilder<'static>, EmbeddingError> {
    // SAFETY: the safetensors file is opened read-only and is not modified while mapped.
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device) }.map_err(
        |e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to map {}: {}", weights_path.display(), e),
        },
    )
}

/// Loads the BERT trunk, accepting plain, `bert.`-prefixed, or `roberta.`-prefixed weights.
fn load_trunk(vb: &VarBuilder, config: &Config) -> candle_core::Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb.clone(), config)
    }
}

/// Token ids, type ids, and attention mask for one sequence, each shaped `[1, seq_len]`.
struct EncodedInput {
    input_ids: Tensor,
    type_ids: Tensor,
    attention_mask: Tensor,
    len: usize,
}

fn encode(
    tokenizer: &Tokenizer,
    text: &str,
    max_len: usize,
    device: &Device,
) -> Result<Option<EncodedInput>, EmbeddingError> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: e.to_string(),
        })?;

    let len = encoding.get_ids().len().min(max_len);
    if len == 0 {
        return Ok(None);
    }

    let to_tensor = |values: &[u32]| -> Result<Tensor, EmbeddingError> {
        Ok(Tensor::new(&values[..len], device)?.unsqueeze(0)?)
    };

    Ok(Some(EncodedInput {
        input_ids: to_tensor(encoding.get_ids())?,
        type_ids: to_tensor(encoding.get_type_ids())?,
        attention_mask: to_tensor(encoding.get_attention_mask())?,
        len,
    }))
}

/// Sentence encoder: BERT trunk + attention-masked mean pooling + L2 normalisation.
pub struct BertEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    hidden_size: usize,
    max_seq_len: usize,
}

impl BertEncoder {
    pub fn load(
        model_dir: &Path,
        max_seq_len: usize,
        device: &Device,
    ) -> Result<Self, EmbeddingError> {
        let (config_path, weights_path) = model_files(model_dir)?;
        let (_, config) = read_config(&config_path)?;
        let vb = var_builder(&weights_path, device)?;
        let model = load_trunk(&vb, &config).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to build encoder: {}", e),
        })?;
        let tokenizer = load_tokenizer_with_truncation(model_dir, max_seq_len)?;

        Ok(Self {
            model,
            tokenizer,
            device: device.clone(),
            hidden_size: config.hidden_size,
            max_seq_len,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns a unit-length embedding (all zeros if the text has no tokens).
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let Some(input) = encode(&self.tokenizer, text, self.max_seq_len, &self.device)? else {
            return Ok(vec![0.0; self.hidden_size]);
        };

        // [1, seq_len, hidden]
        let hidden = self.model.forward(
            &input.input_ids,
            &input.type_ids,
            Some(&input.attention_mask),
        )?;

        let mask = input.attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let count = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
        let pooled = summed.broadcast_div(&count)?.squeeze(0)?;

        let mut embedding = pooled.to_vec1::<f32>()?;
        normalize(&mut embedding);

        tracing::trace!(tokens = input.len, "Sentence embedding computed");
        Ok(embedding)
    }
}

impl std::fmt::Debug for BertEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertEncoder")
            .field("device", &format!("{:?}", self.device))
            .field("hidden_size", &self.hidden_size)
            .field("max_seq_len", &self.max_seq_len)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct LabelMap {
    #[serde(default)]
    id2label: BTreeMap<String, String>,
}

struct SequenceClassifierImpl {
    bert: BertModel,
    classifier: Linear,
}

/// BERT trunk + linear head over the `[CLS]` token, producing one logit per label.
#[derive(Clone)]
pub struct BertSequenceClassifier {
    inner: Arc<SequenceClassifierImpl>,
    tokenizer: Arc<Tokenizer>,
    labels: Vec<String>,
    device: Device,
    max_seq_len: usize,
}

impl BertSequenceClassifier {
    /// Loads the model. Labels come from `id2label` in `config.json`, ordered by id;
    /// `default_labels` is used when the config has none.
    pub fn load(
        model_dir: &Path,
        default_labels: &[&str],
        max_seq_len: usize,
        device: &Device,
    ) -> Result<Self, EmbeddingError> {
        let (config_path, weights_path) = model_files(model_dir)?;
        let (raw_config, config) = read_config(&config_path)?;

        let label_map: LabelMap = serde_json::from_str(&raw_config).unwrap_or_default();
        let mut ordered: Vec<(usize, String)> = label_map
            .id2label
            .into_iter()
            .filter_map(|(id, label)| id.parse::<usize>().ok().map(|id| (id, label)))
            .collect();
        ordered.sort_by_key(|(id, _)| *id);
        let labels: Vec<String> = if ordered.is_empty() {
            default_labels.iter().map(|l| l.to_string()).collect()
        } else {
            ordered.into_iter().map(|(_, label)| label).collect()
        };

        let vb = var_builder(&weights_path, device)?;
        let bert = load_trunk(&vb, &config).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to build classifier trunk: {}", e),
        })?;
        let classifier = candle_nn::linear(config.hidden_size, labels.len(), vb.pp("classifier"))
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("failed to load classification head: {}", e),
            })?;
        let tokenizer = load_tokenizer_with_truncation(model_dir, max_seq_len)?;

        Ok(Self {
            inner: Arc::new(SequenceClassifierImpl { bert, classifier }),
            tokenizer: Arc::new(tokenizer),
            labels,
            device: device.clone(),
            max_seq_len,
        })
    }

    /// Label names in logit order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Softmax probabilities, one per label. Empty input yields a uniform distribution.
    pub fn probabilities(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let Some(input) = encode(&self.tokenizer, text, self.max_seq_len, &self.device)? else {
            let n = self.labels.len().max(1);
            return Ok(vec![1.0 / n as f32; n]);
        };

        let output = self.inner.bert.forward(
            &input.input_ids,
            &input.type_ids,
            Some(&input.attention_mask),
        )?;
        let cls = output.i((.., 0, ..))?;
        let logits = self.inner.classifier.forward(&cls)?;
        let probs = candle_nn::ops::softmax(&logits, 1)?.squeeze(0)?;

        Ok(probs.to_vec1::<f32>()?)
    }
}

impl std::fmt::Debug for BertSequenceClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertSequenceClassifier")
            .field("labels", &self.labels)
            .field("device", &format!("{:?}", self.device))
            .finish()
    }
}

/// Scales `values` to unit L2 norm in place (no-op for the zero vector).
pub fn normalize(values: &mut [f32]) {
    let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in values.iter_mut() {
            *x /= norm;
        }
    }
}
