//! Text extraction from non-text inputs.
//!
//! Only URLs are handled natively ([`UrlScraper`]). Image OCR and audio/video
//! transcription plug in through [`TextExtractor`].

pub mod error;
pub mod html;
pub mod scraper;

#[cfg(test)]
mod tests;

pub use error::ExtractError;
pub use scraper::{UrlScraper, extract_article_text, slug_to_text};

use async_trait::async_trait;

/// Text pulled out of an input, with the publishing domain when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub domain: Option<String>,
}

#[async_trait]
/// Turns a non-text input (URL, file reference) into plain text.
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, input: &str) -> Result<Extracted, ExtractError>;
}

/// Extractor returning a fixed result.
#[cfg(any(test, feature = "mock"))]
pub struct StaticExtractor {
    pub result: Extracted,
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl TextExtractor for StaticExtractor {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn extract(&self, _input: &str) -> Result<Extracted, ExtractError> {
        Ok(self.result.clone())
    }
}
