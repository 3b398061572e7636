use thiserror::Error;

/// Failure of one evidence source. Never escapes the evidence layer.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{source_name}: no API key configured")]
    MissingApiKey { source_name: &'static str },

    #[error("{source_name}: request failed: {reason}")]
    Request {
        source_name: &'static str,
        reason: String,
    },

    #[error("{source_name}: upstream returned HTTP {status}")]
    Status { source_name: &'static str, status: u16 },

    #[error("{source_name}: timed out after {timeout_ms} ms")]
    Timeout {
        source_name: &'static str,
        timeout_ms: u64,
    },

    #[error("{source_name}: malformed response: {reason}")]
    Parse {
        source_name: &'static str,
        reason: String,
    },
}

impl FetchError {
    pub fn source_name(&self) -> &'static str {
        match self {
            FetchError::MissingApiKey { source_name }
            | FetchError::Request { source_name, .. }
            | FetchError::Status { source_name, .. }
            | FetchError::Timeout { source_name, .. }
            | FetchError::Parse { source_name, .. } => source_name,
        }
    }
}
