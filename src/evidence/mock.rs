use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::error::FetchError;
use super::fetcher::EvidenceRetriever;
use super::sources::NewsSource;
use super::types::EvidenceArticle;

enum MockResponse {
    Articles(Vec<EvidenceArticle>),
    Failure,
}

/// Scripted [`NewsSource`] that counts calls and can be made slow or failing.
pub struct MockNewsSource {
    name: &'static str,
    response: MockResponse,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockNewsSource {
    pub fn new(name: &'static str, articles: Vec<EvidenceArticle>) -> Self {
        Self {
            name,
            response: MockResponse::Articles(articles),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            response: MockResponse::Failure,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for MockNewsSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(
        &self,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<EvidenceArticle>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.response {
            MockResponse::Articles(articles) => {
                Ok(articles.iter().take(max_results).cloned().collect())
            }
            MockResponse::Failure => Err(FetchError::Status {
                source_name: self.name,
                status: 503,
            }),
        }
    }
}

/// [`EvidenceRetriever`] returning a fixed article list.
#[derive(Default)]
pub struct MockRetriever {
    articles: Vec<EvidenceArticle>,
    calls: AtomicUsize,
}

impl MockRetriever {
    pub fn new(articles: Vec<EvidenceArticle>) -> Self {
        Self {
            articles,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvidenceRetriever for MockRetriever {
    async fn fetch_evidence(
        &self,
        _claim: &str,
        _entities: &[String],
        max_results: usize,
    ) -> Vec<EvidenceArticle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.articles.iter().take(max_results).cloned().collect()
    }
}

/// Article with the given title/description hosted at `url`.
pub fn article(title: &str, description: &str, url: &str) -> EvidenceArticle {
    EvidenceArticle {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        source_name: None,
        source_url: None,
        published_at: None,
    }
}
