use thiserror::Error;

use crate::classifier::ClassifierError;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),

    #[error("verification task failed: {reason}")]
    Internal { reason: String },
}
