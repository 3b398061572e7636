use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

use super::error::ExtractError;
use super::html::{drop_noise, elements, meta_text, text_of};
use super::{Extracted, TextExtractor};
use crate::domain::extract_domain;

/// Extracted bodies shorter than this fall through to the next strategy.
const MIN_BODY_CHARS: usize = 100;

/// Below this, page metadata is preferred if it is longer.
const PREFER_META_BELOW: usize = 300;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const CHALLENGE_MARKERS: &[&str] = &[
    "just a moment",
    "attention required",
    "access denied",
    "please wait",
    "checking your browser",
    "ddos-guard",
    "enable javascript",
];

const BLOCK_TAGS: &[&str] = &["p", "li", "blockquote", "h1", "h2", "h3", "h4", "td"];

/// Fetches an article page and pulls out its readable text.
pub struct UrlScraper {
    http: HttpClient,
}

impl UrlScraper {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

    pub fn new(timeout: Duration) -> Self {
        Self {
            http: HttpClient::builder()
                .timeout(timeout)
                .user_agent(BROWSER_USER_AGENT)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
        }
    }
}

impl Default for UrlScraper {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

fn is_bot_challenge(status: u16, body: &str) -> bool {
    if matches!(status, 403 | 429 | 503) {
        return true;
    }
    let head: String = body.chars().take(2_000).collect::<String>().to_lowercase();
    CHALLENGE_MARKERS.iter().any(|m| head.contains(m))
}

/// `"https://inquirer.net/123/live-updates-duterte-icc/"` →
/// `"live updates duterte icc from inquirer.net"`.
pub fn slug_to_text(url: &str) -> String {
    let domain = extract_domain(url);
    let path = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url)
        .split_once('/')
        .map(|(_, path)| path)
        .unwrap_or("");
    let path = path.split(['?', '#']).next().unwrap_or("");

    let slug = path
        .split('/')
        .filter(|s| s.len() > 5 && !s.chars().all(|c| c.is_ascii_digit()))
        .next_back();

    match slug {
        Some(slug) => format!("{} from {}", slug.replace(['-', '_'], " "), domain),
        None => domain,
    }
}

fn join_text(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|f| text_of(f))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Waterfall: `<p>` inside `<article>`/`<main>`, then block tags inside them, then
/// `<p>`/`<li>` anywhere, then all body text. Metadata wins when the body is thin.
pub fn extract_article_text(html: &str) -> String {
    let cleaned = drop_noise(html);

    let containers: Vec<&str> = ["article", "main"]
        .iter()
        .flat_map(|tag| elements(&cleaned, tag))
        .collect();

    let mut text = String::new();
    for container in &containers {
        let candidate = join_text(&elements(container, "p"));
        if candidate.len() >= MIN_BODY_CHARS {
            debug!(chars = candidate.len(), "Extracted via container paragraphs");
            text = candidate;
            break;
        }
    }

    if text.is_empty()
        && let Some(container) = containers.first()
    {
        let blocks: Vec<&str> = BLOCK_TAGS
            .iter()
            .flat_map(|tag| elements(container, tag))
            .collect();
        let candidate = join_text(&blocks);
        if candidate.len() >= MIN_BODY_CHARS {
            debug!(chars = candidate.len(), "Extracted via container block tags");
            text = candidate;
        }
    }

    if text.is_empty() {
        let mut blocks = elements(&cleaned, "p");
        blocks.extend(elements(&cleaned, "li"));
        let candidate = join_text(&blocks);
        if candidate.len() >= MIN_BODY_CHARS {
            debug!(chars = candidate.len(), "Extracted via document paragraphs");
            text = candidate;
        }
    }

    if text.is_empty() {
        let body = elements(&cleaned, "body");
        text = text_of(body.first().copied().unwrap_or(cleaned.as_str()));
    }

    if text.len() < PREFER_META_BELOW {
        let meta = meta_text(html);
        if meta.len() > text.len() {
            debug!(body_chars = text.len(), meta_chars = meta.len(), "Using page metadata");
            text = meta;
        }
    }

    text
}

#[async_trait]
impl TextExtractor for UrlScraper {
    fn name(&self) -> &'static str {
        "url"
    }

    async fn extract(&self, url: &str) -> Result<Extracted, ExtractError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ExtractError::InvalidUrl {
                url: url.to_string(),
            });
        }
        let domain = extract_domain(url);
        if domain.is_empty() {
            return Err(ExtractError::InvalidUrl {
                url: url.to_string(),
            });
        }

        let resp = self
            .http
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| ExtractError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| ExtractError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if is_bot_challenge(status, &body) {
            warn!(domain = %domain, status, "Bot challenge detected, salvaging metadata");
            let meta = meta_text(&body);
            let text = if meta.chars().count() >= 20 {
                meta
            } else {
                slug_to_text(url)
            };
            return Ok(Extracted {
                text,
                domain: Some(domain),
            });
        }

        if !(200..300).contains(&status) {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status,
            });
        }

        let text = extract_article_text(&body);
        info!(domain = %domain, chars = text.len(), "Scraped article");
        Ok(Extracted {
            text,
            domain: Some(domain),
        })
    }
}
