use std::time::Duration;

use crate::config::env;
use crate::constants::DEFAULT_MAX_EVIDENCE_RESULTS;

/// Evidence retrieval settings.
#[derive(Clone)]
pub struct EvidenceConfig {
    /// NewsAPI key; the keyed source is skipped without it.
    pub news_api_key: Option<String>,
    pub google_news_enabled: bool,
    /// Per-source request timeout.
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
    /// Articles scored per request.
    pub max_results: usize,
}

impl std::fmt::Debug for EvidenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceConfig")
            .field("news_api_key", &self.news_api_key.as_ref().map(|_| "<redacted>"))
            .field("google_news_enabled", &self.google_news_enabled)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_capacity", &self.cache_capacity)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            google_news_enabled: true,
            fetch_timeout: Duration::from_millis(8_000),
            cache_ttl: Duration::from_secs(86_400),
            cache_capacity: 1_024,
            max_results: DEFAULT_MAX_EVIDENCE_RESULTS,
        }
    }
}

impl EvidenceConfig {
    pub const ENV_NEWS_API_KEY: &'static str = "PHILVERIFY_NEWS_API_KEY";
    pub const ENV_GOOGLE_NEWS_ENABLED: &'static str = "PHILVERIFY_GOOGLE_NEWS_ENABLED";
    pub const ENV_FETCH_TIMEOUT_MS: &'static str = "PHILVERIFY_FETCH_TIMEOUT_MS";
    pub const ENV_CACHE_TTL_SECS: &'static str = "PHILVERIFY_EVIDENCE_CACHE_TTL_SECS";
    pub const ENV_CACHE_CAPACITY: &'static str = "PHILVERIFY_EVIDENCE_CACHE_CAPACITY";
    pub const ENV_MAX_RESULTS: &'static str = "PHILVERIFY_MAX_EVIDENCE_RESULTS";

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            news_api_key: env::string(Self::ENV_NEWS_API_KEY),
            google_news_enabled: env::bool_or(
                Self::ENV_GOOGLE_NEWS_ENABLED,
                defaults.google_news_enabled,
            ),
            fetch_timeout: env::millis_or(Self::ENV_FETCH_TIMEOUT_MS, defaults.fetch_timeout),
            cache_ttl: env::secs_or(Self::ENV_CACHE_TTL_SECS, defaults.cache_ttl),
            cache_capacity: env::parse_or(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity),
            max_results: env::parse_or(Self::ENV_MAX_RESULTS, defaults.max_results).max(1),
        }
    }

    /// Configuration with every network source off (offline / tests).
    pub fn offline() -> Self {
        Self {
            google_news_enabled: false,
            news_api_key: None,
            ..Default::default()
        }
    }

    /// `true` if at least one source can be queried.
    pub fn has_sources(&self) -> bool {
        self.google_news_enabled || self.news_api_key.is_some()
    }
}
