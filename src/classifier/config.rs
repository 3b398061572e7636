use std::path::PathBuf;

/// Token budget per input; covers most headlines and short posts.
pub const DEFAULT_CLASSIFIER_MAX_SEQ_LEN: usize = 256;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Directory with `config.json`, `model.safetensors`, `tokenizer.json`. `None`
    /// selects the lexicon baseline.
    pub model_dir: Option<PathBuf>,
    pub max_seq_len: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: DEFAULT_CLASSIFIER_MAX_SEQ_LEN,
        }
    }
}

impl ClassifierConfig {
    pub const ENV_MODEL_PATH: &'static str = "PHILVERIFY_CLASSIFIER_MODEL_PATH";

    pub fn from_env() -> Self {
        Self {
            model_dir: crate::config::env::optional_path(Self::ENV_MODEL_PATH),
            ..Default::default()
        }
    }

    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    pub fn lexicon() -> Self {
        Self::default()
    }
}
