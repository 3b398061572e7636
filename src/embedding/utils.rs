use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

use super::error::EmbeddingError;

const TOKENIZER_FILE: &str = "tokenizer.json";

/// Loads `tokenizer.json` from a model directory (or takes the file path directly).
pub fn load_tokenizer(model_path: &Path) -> Result<Tokenizer, EmbeddingError> {
    let tokenizer_path = if model_path.is_dir() {
        model_path.join(TOKENIZER_FILE)
    } else {
        model_path.to_path_buf()
    };

    if !tokenizer_path.exists() {
        return Err(EmbeddingError::MissingFile {
            dir: model_path.to_path_buf(),
            file: TOKENIZER_FILE,
        });
    }

    Tokenizer::from_file(&tokenizer_path).map_err(|e| EmbeddingError::TokenizationFailed {
        reason: format!("failed to load {}: {}", tokenizer_path.display(), e),
    })
}

/// Like [`load_tokenizer`], with truncation at `max_len` tokens.
pub fn load_tokenizer_with_truncation(
    model_path: &Path,
    max_len: usize,
) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to configure truncation: {}", e),
        })?;

    Ok(tokenizer)
}
