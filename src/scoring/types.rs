use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, DomainTier};
use crate::evidence::Layer2Result;

/// Three-way credibility label used by both layers and the fused result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Credible")]
    Credible,
    #[serde(rename = "Unverified")]
    Unverified,
    #[serde(rename = "Likely Fake")]
    LikelyFake,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Credible, Verdict::Unverified, Verdict::LikelyFake];

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Credible => "Credible",
            Verdict::Unverified => "Unverified",
            Verdict::LikelyFake => "Likely Fake",
        }
    }

    /// Parses the display form, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the text entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Url,
    Image,
    Video,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Url => "url",
            InputType::Image => "image",
            InputType::Video => "video",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected language of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Tagalog,
    English,
    Taglish,
    Unknown,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Tagalog => "Tagalog",
            Language::English => "English",
            Language::Taglish => "Taglish",
            Language::Unknown => "Unknown",
        }
    }
}

/// Output of the Layer-1 classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer1Result {
    pub verdict: Verdict,
    /// Confidence in `verdict`, 0–100.
    pub confidence: f64,
    #[serde(default)]
    pub triggered_features: Vec<String>,
}

/// Named entities found in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitiesResult {
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub dates: Vec<String>,
}

impl EntitiesResult {
    /// Persons, organisations, and locations in that order (dates excluded).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.persons
            .iter()
            .chain(&self.organizations)
            .chain(&self.locations)
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
            && self.organizations.is_empty()
            && self.locations.is_empty()
            && self.dates.is_empty()
    }
}

/// How the source domain moved the fused score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainAdjustment {
    pub tier: DomainTier,
    pub base_adjustment: f64,
    pub multiplier: f64,
    pub applied: f64,
}

/// Final fused verdict for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    pub verdict: Verdict,
    pub confidence: f64,
    pub final_score: f64,
    pub layer1: Layer1Result,
    pub layer2: Layer2Result,
    pub entities: EntitiesResult,
    pub sentiment: String,
    pub emotion: String,
    pub language: Language,
    pub domain_credibility: Option<DomainResult>,
    pub domain_adjustment: Option<DomainAdjustment>,
    pub input_type: InputType,
    pub processing_time_ms: f64,
}
