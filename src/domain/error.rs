use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid domain tier '{value}': expected tier1..tier4")]
    InvalidTier { value: String },

    #[error("failed to read domain table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed domain table: {0}")]
    Parse(#[from] serde_json::Error),
}
