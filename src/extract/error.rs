use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid URL '{url}'")]
    InvalidUrl { url: String },

    #[error("fetching {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{input_type} extraction is not supported")]
    Unsupported { input_type: &'static str },
}
