//! Upstream news sources.
//!
//! [`GoogleNewsRss`] needs no key and is the primary source; [`NewsApi`] is the keyed
//! secondary. Both return articles in upstream relevance order.

use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::error::FetchError;
use super::types::EvidenceArticle;
use crate::constants::{CLAIM_QUERY_CHARS, truncate_chars};
use crate::extract::html::{decode_entities, strip_tags};

/// Entity names prepended to the search query.
pub const MAX_QUERY_ENTITIES: usize = 3;

const USER_AGENT: &str = concat!("philverify/", env!("CARGO_PKG_VERSION"));

#[async_trait]
/// A searchable news index.
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<EvidenceArticle>, FetchError>;
}

/// Up to three entity names not already in the claim, then the claim cut to 100 chars.
pub fn build_query(claim: &str, entities: &[String]) -> String {
    let claim_lower = claim.to_lowercase();
    let mut parts: Vec<&str> = Vec::with_capacity(MAX_QUERY_ENTITIES + 1);

    for entity in entities {
        if parts.len() == MAX_QUERY_ENTITIES {
            break;
        }
        let entity = entity.trim();
        if entity.is_empty()
            || claim_lower.contains(&entity.to_lowercase())
            || parts.iter().any(|p| p.eq_ignore_ascii_case(entity))
        {
            continue;
        }
        parts.push(entity);
    }

    let claim = truncate_chars(claim.trim(), CLAIM_QUERY_CHARS);
    if !claim.is_empty() {
        parts.push(claim);
    }
    parts.join(" ")
}

fn http_client(timeout: Duration) -> HttpClient {
    HttpClient::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

fn request_error(source_name: &'static str, timeout: Duration, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            source_name,
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        FetchError::Request {
            source_name,
            reason: err.to_string(),
        }
    }
}

/// Google News search RSS, Philippine edition.
pub struct GoogleNewsRss {
    http: HttpClient,
    endpoint: String,
    timeout: Duration,
}

impl GoogleNewsRss {
    pub const NAME: &'static str = "google_news";
    pub const DEFAULT_ENDPOINT: &'static str = "https://news.google.com/rss/search";

    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT, timeout)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: http_client(timeout),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl NewsSource for GoogleNewsRss {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<EvidenceArticle>, FetchError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("hl", "en-PH"), ("gl", "PH"), ("ceid", "PH:en")])
            .send()
            .await
            .map_err(|e| request_error(Self::NAME, self.timeout, e))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                source_name: Self::NAME,
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| request_error(Self::NAME, self.timeout, e))?;
        let mut articles = parse_rss(&body)?;
        articles.truncate(max_results);
        Ok(articles)
    }
}

#[derive(Default)]
struct RssItem {
    title: String,
    link: String,
    description: String,
    pub_date: Option<String>,
    source_name: Option<String>,
    source_url: Option<String>,
}

impl RssItem {
    fn into_article(self) -> Option<EvidenceArticle> {
        let title = self.title.trim().to_string();
        if title.is_empty() || self.link.trim().is_empty() {
            return None;
        }

        // Google News titles end with " - {publisher}".
        let title = match &self.source_name {
            Some(name) => title
                .strip_suffix(name.as_str())
                .and_then(|t| t.strip_suffix(" - "))
                .map(str::to_string)
                .unwrap_or(title),
            None => title,
        };

        let description = decode_entities(&strip_tags(&self.description))
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Some(EvidenceArticle {
            title,
            url: self.link.trim().to_string(),
            description,
            source_name: self.source_name,
            source_url: self.source_url,
            published_at: self.pub_date,
        })
    }
}

#[derive(Clone, Copy, PartialEq)]
enum RssField {
    Title,
    Link,
    Description,
    PubDate,
    Source,
}

/// Parses the `<item>` elements of an RSS 2.0 document.
pub fn parse_rss(xml: &str) -> Result<Vec<EvidenceArticle>, FetchError> {
    let parse_err = |reason: String| FetchError::Parse {
        source_name: GoogleNewsRss::NAME,
        reason,
    };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut articles = Vec::new();
    let mut item: Option<RssItem> = None;
    let mut field: Option<RssField> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => item = Some(RssItem::default()),
                b"title" => field = Some(RssField::Title),
                b"link" => field = Some(RssField::Link),
                b"description" => field = Some(RssField::Description),
                b"pubDate" => field = Some(RssField::PubDate),
                b"source" => {
                    field = Some(RssField::Source);
                    if let Some(current) = item.as_mut() {
                        current.source_url = e
                            .try_get_attribute("url")
                            .ok()
                            .flatten()
                            .and_then(|attr| attr.unescape_value().ok())
                            .map(|v| v.into_owned());
                    }
                }
                _ => field = None,
            },
            Ok(Event::Text(t)) => {
                if let (Some(current), Some(f)) = (item.as_mut(), field) {
                    let text = t.unescape().map_err(|e| parse_err(e.to_string()))?;
                    push_field(current, f, &text);
                }
            }
            Ok(Event::CData(c)) => {
                if let (Some(current), Some(f)) = (item.as_mut(), field) {
                    push_field(current, f, &String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(article) = item.take().and_then(RssItem::into_article) {
                        articles.push(article);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(parse_err(e.to_string())),
        }
    }

    Ok(articles)
}

fn push_field(item: &mut RssItem, field: RssField, text: &str) {
    match field {
        RssField::Title => item.title.push_str(text),
        RssField::Link => item.link.push_str(text),
        RssField::Description => item.description.push_str(text),
        RssField::PubDate => item.pub_date = Some(text.trim().to_string()),
        RssField::Source => item.source_name = Some(text.trim().to_string()),
    }
}

/// NewsAPI `/v2/everything`.
pub struct NewsApi {
    http: HttpClient,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl std::fmt::Debug for NewsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApi")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl NewsApi {
    pub const NAME: &'static str = "newsapi";
    pub const DEFAULT_ENDPOINT: &'static str = "https://newsapi.org/v2/everything";

    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_endpoint(api_key, Self::DEFAULT_ENDPOINT, timeout)
    }

    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: http_client(timeout),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    #[serde(default)]
    source: Option<NewsApiSource>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    #[serde(default)]
    name: Option<String>,
}

/// Parses a NewsAPI response body, dropping articles without a title or URL.
pub fn parse_newsapi(body: &str) -> Result<Vec<EvidenceArticle>, FetchError> {
    let resp: NewsApiResponse = serde_json::from_str(body).map_err(|e| FetchError::Parse {
        source_name: NewsApi::NAME,
        reason: e.to_string(),
    })?;

    if resp.status.as_deref() == Some("error") {
        return Err(FetchError::Request {
            source_name: NewsApi::NAME,
            reason: resp.message.unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    Ok(resp
        .articles
        .into_iter()
        .filter_map(|a| {
            let title = a.title.filter(|t| !t.trim().is_empty())?;
            let url = a.url.filter(|u| !u.trim().is_empty())?;
            Some(EvidenceArticle {
                title,
                url,
                description: a.description.unwrap_or_default(),
                source_name: a.source.and_then(|s| s.name),
                source_url: None,
                published_at: a.published_at,
            })
        })
        .collect())
}

#[async_trait]
impl NewsSource for NewsApi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<EvidenceArticle>, FetchError> {
        if self.api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey {
                source_name: Self::NAME,
            });
        }

        let page_size = max_results.clamp(1, 100).to_string();
        let resp = self
            .http
            .get(&self.endpoint)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| request_error(Self::NAME, self.timeout, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| request_error(Self::NAME, self.timeout, e))?;
        if !status.is_success() {
            return Err(FetchError::Status {
                source_name: Self::NAME,
                status: status.as_u16(),
            });
        }

        let mut articles = parse_newsapi(&body)?;
        articles.truncate(max_results);
        Ok(articles)
    }
}
