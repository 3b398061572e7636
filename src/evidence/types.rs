use serde::{Deserialize, Serialize};

use crate::domain::{DomainTier, extract_domain};
use crate::scoring::Verdict;

/// A candidate article from an evidence source, as retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceArticle {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_name: Option<String>,
    /// Publisher homepage when `url` is an aggregator redirect.
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl EvidenceArticle {
    /// `"{title} {description}"`, the text scored against the claim.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Publisher hostname, preferring `source_url` over `url`.
    pub fn domain(&self) -> String {
        self.source_url
            .as_deref()
            .map(extract_domain)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| extract_domain(&self.url))
    }

    /// Every URL known for the article, space-joined, for fact-check domain matching.
    pub fn urls(&self) -> String {
        match &self.source_url {
            Some(source) if !source.is_empty() => format!("{} {}", self.url, source),
            _ => self.url.clone(),
        }
    }
}

/// Relationship between one article and the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    #[serde(rename = "Supports")]
    Supports,
    #[serde(rename = "Refutes")]
    Refutes,
    #[serde(rename = "Not Enough Info")]
    NotEnoughInfo,
}

impl Stance {
    pub fn as_str(self) -> &'static str {
        match self {
            Stance::Supports => "Supports",
            Stance::Refutes => "Refutes",
            Stance::NotEnoughInfo => "Not Enough Info",
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceResult {
    pub stance: Stance,
    /// 0.0–1.0.
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
    pub reason: String,
}

/// An article after similarity and stance scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSource {
    pub title: String,
    pub url: String,
    pub similarity: f64,
    pub stance: Stance,
    pub stance_reason: String,
    pub domain_tier: DomainTier,
    pub published_at: Option<String>,
    pub source_name: Option<String>,
}

/// Output of the evidence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer2Result {
    pub verdict: Verdict,
    /// 0–100.
    pub evidence_score: f64,
    pub sources: Vec<EvidenceSource>,
    pub claim_used: String,
}
