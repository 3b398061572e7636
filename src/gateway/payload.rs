//! Request bodies and query strings.

use serde::Deserialize;

use crate::history::{DEFAULT_PAGE_LIMIT, DEFAULT_TREND_DAYS, DEFAULT_TREND_LIMIT};

pub const MIN_TEXT_CHARS: usize = 10;
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Below this many extracted characters a page is treated as unreadable.
pub const MIN_EXTRACTED_CHARS: usize = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_limit")]
    pub limit: usize,
    #[serde(default)]
    pub verdict: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendsParams {
    #[serde(default = "default_trend_days")]
    pub days: u32,
    #[serde(default = "default_trend_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

fn default_trend_days() -> u32 {
    DEFAULT_TREND_DAYS
}

fn default_trend_limit() -> usize {
    DEFAULT_TREND_LIMIT
}
