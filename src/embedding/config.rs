use std::path::PathBuf;

use super::error::EmbeddingError;

/// Token budget per input for the sentence encoder.
pub const DEFAULT_EMBED_MAX_SEQ_LEN: usize = 256;

/// Output dimension of the stub backend (matches MiniLM-class encoders).
pub const STUB_EMBEDDING_DIM: usize = 384;

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct EmbedderConfig {
    /// Directory with `config.json`, `model.safetensors`, `tokenizer.json`.
    pub model_dir: PathBuf,
    pub max_seq_len: usize,
    /// If true, produce deterministic hash-based vectors (no model files).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: DEFAULT_EMBED_MAX_SEQ_LEN,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    pub const ENV_MODEL_PATH: &'static str = "PHILVERIFY_EMBEDDING_MODEL_PATH";

    /// Reads the model directory from the environment (unset → empty path).
    pub fn from_env() -> Self {
        Self {
            model_dir: crate::config::env::optional_path(Self::ENV_MODEL_PATH).unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.testing_stub {
            return Ok(());
        }
        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required unless running as a stub".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be positive".to_string(),
            });
        }
        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }
        Ok(())
    }

    /// `true` if a model directory is configured and exists.
    pub fn model_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty() && self.model_dir.is_dir()
    }
}
