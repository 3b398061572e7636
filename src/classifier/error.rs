use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("cannot classify empty text")]
    EmptyInput,

    #[error("model label '{label}' does not map to a verdict")]
    UnknownLabel { label: String },

    #[error("classifier model error: {0}")]
    Model(#[from] EmbeddingError),

    #[error("classifier produced no output")]
    NoOutput,
}
