use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::cache::EvidenceCache;
use super::config::EvidenceConfig;
use super::error::FetchError;
use super::sources::{GoogleNewsRss, NewsApi, NewsSource, build_query};
use super::types::EvidenceArticle;
use crate::hashing::{claim_key_hex, evidence_key};

#[async_trait]
/// Retrieves candidate articles for a claim. Never fails: an unreachable upstream
/// yields fewer (or zero) articles.
pub trait EvidenceRetriever: Send + Sync {
    async fn fetch_evidence(
        &self,
        claim: &str,
        entities: &[String],
        max_results: usize,
    ) -> Vec<EvidenceArticle>;
}

/// Queries the primary and secondary sources concurrently and merges them in fixed
/// priority order, deduplicated by publisher domain.
pub struct EvidenceFetcher {
    primary: Option<Arc<dyn NewsSource>>,
    secondary: Option<Arc<dyn NewsSource>>,
    cache: EvidenceCache,
    timeout: Duration,
}

impl std::fmt::Debug for EvidenceFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceFetcher")
            .field("primary", &self.primary.as_ref().map(|s| s.name()))
            .field("secondary", &self.secondary.as_ref().map(|s| s.name()))
            .field("cache", &self.cache)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EvidenceFetcher {
    pub fn new(
        primary: Option<Arc<dyn NewsSource>>,
        secondary: Option<Arc<dyn NewsSource>>,
        cache: EvidenceCache,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            cache,
            timeout,
        }
    }

    /// Google News RSS (if enabled) as primary, NewsAPI (if keyed) as secondary.
    pub fn from_config(config: &EvidenceConfig) -> Self {
        let primary: Option<Arc<dyn NewsSource>> = config
            .google_news_enabled
            .then(|| Arc::new(GoogleNewsRss::new(config.fetch_timeout)) as Arc<dyn NewsSource>);
        let secondary: Option<Arc<dyn NewsSource>> = config.news_api_key.as_ref().map(|key| {
            Arc::new(NewsApi::new(key.clone(), config.fetch_timeout)) as Arc<dyn NewsSource>
        });

        if secondary.is_none() {
            warn!("No NewsAPI key configured, secondary evidence source disabled");
        }

        Self::new(
            primary,
            secondary,
            EvidenceCache::new(config.cache_capacity, config.cache_ttl),
            config.fetch_timeout,
        )
    }

    pub fn has_sources(&self) -> bool {
        self.primary.is_some() || self.secondary.is_some()
    }

    pub fn cache(&self) -> &EvidenceCache {
        &self.cache
    }

    async fn query_source(
        &self,
        source: Option<&dyn NewsSource>,
        query: &str,
        max_results: usize,
    ) -> Option<Result<Vec<EvidenceArticle>, FetchError>> {
        let source = source?;
        let result = match tokio::time::timeout(self.timeout, source.search(query, max_results))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                source_name: source.name(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };
        Some(result)
    }
}

/// Concatenates in argument order, keeping the first article per publisher domain
/// (or per URL when the domain is unknown), then truncates.
pub fn merge_articles(
    batches: impl IntoIterator<Item = Vec<EvidenceArticle>>,
    max_results: usize,
) -> Vec<EvidenceArticle> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for article in batches.into_iter().flatten() {
        if merged.len() == max_results {
            break;
        }
        let domain = article.domain();
        let key = if domain.is_empty() {
            article.url.clone()
        } else {
            domain
        };
        if seen.insert(key) {
            merged.push(article);
        }
    }

    merged
}

/// Unwraps one source's outcome. The flag is false when the source was configured
/// but failed or timed out.
fn unwrap_or_log(
    result: Option<Result<Vec<EvidenceArticle>, FetchError>>,
) -> (Vec<EvidenceArticle>, bool) {
    match result {
        Some(Ok(articles)) => (articles, true),
        Some(Err(e)) => {
            warn!(source = e.source_name(), error = %e, "Evidence source failed");
            (Vec::new(), false)
        }
        None => (Vec::new(), true),
    }
}

#[async_trait]
impl EvidenceRetriever for EvidenceFetcher {
    async fn fetch_evidence(
        &self,
        claim: &str,
        entities: &[String],
        max_results: usize,
    ) -> Vec<EvidenceArticle> {
        if claim.trim().is_empty() || max_results == 0 {
            return Vec::new();
        }

        let query = build_query(claim, entities);
        let key = evidence_key(claim, &query, max_results);
        if let Some(cached) = self.cache.get(&key) {
            info!(claim_key = %&claim_key_hex(claim)[..8], "Evidence cache hit");
            return cached.as_ref().clone();
        }

        if !self.has_sources() {
            debug!("No evidence sources configured");
            return Vec::new();
        }

        let (primary, secondary) = tokio::join!(
            self.query_source(self.primary.as_deref(), &query, max_results),
            self.query_source(self.secondary.as_deref(), &query, max_results),
        );
        let (primary, primary_ok) = unwrap_or_log(primary);
        let (secondary, secondary_ok) = unwrap_or_log(secondary);

        let merged = merge_articles([primary, secondary], max_results);
        info!(
            query_len = query.len(),
            articles = merged.len(),
            "Evidence retrieved"
        );

        if primary_ok && secondary_ok {
            self.cache.insert(key, merged.clone());
        } else {
            debug!("Partial retrieval, result not cached");
        }
        merged
    }
}
