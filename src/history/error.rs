use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid history query: {reason}")]
    InvalidQuery { reason: String },

    #[error("history write task failed: {reason}")]
    Task { reason: String },
}
