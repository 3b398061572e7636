//! Publisher credibility tiers.
//!
//! A static table maps a normalized hostname to one of four [`DomainTier`]s. Each tier
//! carries a fixed score adjustment used by [`crate::scoring`] and an implied
//! credibility reference used by the disagreement multiplier.
//!
//! Unknown hosts are not an error: they resolve to [`DomainTier::Suspicious`].
//!
//! The built-in table can be replaced at startup with a JSON file of the form
//! `{"tier1": {"description": "...", "domains": ["rappler.com", ...]}, ...}`.

pub mod error;
mod table;


pub use error::DomainError;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Credibility tier of a publishing domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DomainTier {
    /// Established news organisations.
    Credible = 1,
    /// Satire, opinion blogs, entertainment.
    SatireOpinion = 2,
    /// Unknown, new, or low-authority sites.
    Suspicious = 3,
    /// Sites on fact-checker blacklists.
    KnownFake = 4,
}

impl DomainTier {
    /// All tiers in table order.
    pub const ALL: [DomainTier; 4] = [
        DomainTier::Credible,
        DomainTier::SatireOpinion,
        DomainTier::Suspicious,
        DomainTier::KnownFake,
    ];

    /// Points added to (or removed from) the fused score for content from this tier.
    pub fn score_adjustment(self) -> f64 {
        match self {
            DomainTier::Credible => 20.0,
            DomainTier::SatireOpinion => -5.0,
            DomainTier::Suspicious => -10.0,
            DomainTier::KnownFake => -35.0,
        }
    }

    /// Credibility (0–100) the source's reputation alone would suggest.
    ///
    /// Only used to measure how far the classifier disagrees with the source.
    pub fn implied_credibility(self) -> f64 {
        match self {
            DomainTier::Credible => 75.0,
            DomainTier::SatireOpinion | DomainTier::Suspicious => 50.0,
            DomainTier::KnownFake => 25.0,
        }
    }

    /// Short label.
    pub fn label(self) -> &'static str {
        match self {
            DomainTier::Credible => "Credible",
            DomainTier::SatireOpinion => "Satire/Opinion",
            DomainTier::Suspicious => "Suspicious",
            DomainTier::KnownFake => "Known Fake",
        }
    }

    /// Numeric tier (1–4).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<DomainTier> for u8 {
    fn from(tier: DomainTier) -> Self {
        tier.as_u8()
    }
}

impl TryFrom<u8> for DomainTier {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DomainTier::Credible),
            2 => Ok(DomainTier::SatireOpinion),
            3 => Ok(DomainTier::Suspicious),
            4 => Ok(DomainTier::KnownFake),
            other => Err(DomainError::InvalidTier {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for DomainTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {} ({})", self.as_u8(), self.label())
    }
}

/// Outcome of a [`DomainCredibility::lookup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainResult {
    /// Normalized hostname that was looked up (empty if input was empty).
    pub domain: String,
    pub tier: DomainTier,
    pub tier_label: &'static str,
    pub score_adjustment: f64,
    /// Table entry that matched, if any.
    pub matched_entry: Option<String>,
}

impl DomainResult {
    fn new(domain: String, tier: DomainTier, matched_entry: Option<String>) -> Self {
        Self {
            domain,
            tier,
            tier_label: tier.label(),
            score_adjustment: tier.score_adjustment(),
            matched_entry,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TierSection {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    domains: Vec<String>,
}

/// Read-only domain → tier table, built once at startup.
#[derive(Debug, Clone)]
pub struct DomainCredibility {
    tiers: Vec<(DomainTier, Vec<String>)>,
    descriptions: HashMap<DomainTier, String>,
}

impl Default for DomainCredibility {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DomainCredibility {
    /// Table compiled into the binary.
    pub fn builtin() -> Self {
        let tiers = table::BUILTIN_TIERS
            .iter()
            .map(|(tier, domains)| (*tier, domains.iter().map(|d| d.to_string()).collect()))
            .collect();
        let descriptions = table::BUILTIN_DESCRIPTIONS
            .iter()
            .map(|(tier, text)| (*tier, text.to_string()))
            .collect();
        Self {
            tiers,
            descriptions,
        }
    }

    /// Parses a JSON table (`{"tier1": {"domains": [...]}, ...}`).
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let raw: HashMap<String, TierSection> = serde_json::from_str(json)?;

        let mut tiers = Vec::with_capacity(raw.len());
        let mut descriptions = HashMap::new();
        for (key, section) in raw {
            let tier = parse_tier_key(&key)?;
            let domains = section
                .domains
                .iter()
                .map(|d| extract_domain(d))
                .filter(|d| !d.is_empty())
                .collect();
            if let Some(description) = section.description {
                descriptions.insert(tier, description);
            }
            tiers.push((tier, domains));
        }
        tiers.sort_by_key(|(tier, _)| *tier);

        Ok(Self {
            tiers,
            descriptions,
        })
    }

    /// Loads a JSON table from disk.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|source| DomainError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            domains = table.domain_count(),
            tiers = table.tiers.len(),
            "Domain credibility table loaded"
        );
        Ok(table)
    }

    /// Classifies a URL or bare host. Unknown or empty input → [`DomainTier::Suspicious`].
    pub fn lookup(&self, url_or_domain: &str) -> DomainResult {
        let domain = extract_domain(url_or_domain);
        if domain.is_empty() {
            return DomainResult::new(domain, DomainTier::Suspicious, None);
        }

        for (tier, entries) in &self.tiers {
            for entry in entries {
                if domain == *entry || is_subdomain_of(&domain, entry) {
                    return DomainResult::new(domain, *tier, Some(entry.clone()));
                }
            }
        }

        debug!(domain = %domain, "Domain not in credibility table, defaulting to Suspicious");
        DomainResult::new(domain, DomainTier::Suspicious, None)
    }

    /// Shorthand for `lookup(..).tier`.
    pub fn tier_of(&self, url_or_domain: &str) -> DomainTier {
        self.lookup(url_or_domain).tier
    }

    /// Shorthand for `lookup(..).score_adjustment`.
    pub fn score_adjustment(&self, url_or_domain: &str) -> f64 {
        self.lookup(url_or_domain).score_adjustment
    }

    /// `true` if the host is on the known-fake tier.
    pub fn is_blacklisted(&self, url_or_domain: &str) -> bool {
        self.tier_of(url_or_domain) == DomainTier::KnownFake
    }

    /// Table description for a tier, falling back to its label.
    pub fn describe_tier(&self, tier: DomainTier) -> &str {
        self.descriptions
            .get(&tier)
            .map(String::as_str)
            .unwrap_or_else(|| tier.label())
    }

    /// Total number of listed domains.
    pub fn domain_count(&self) -> usize {
        self.tiers.iter().map(|(_, d)| d.len()).sum()
    }
}

fn parse_tier_key(key: &str) -> Result<DomainTier, DomainError> {
    key.strip_prefix("tier")
        .and_then(|n| n.parse::<u8>().ok())
        .ok_or_else(|| DomainError::InvalidTier {
            value: key.to_string(),
        })
        .and_then(DomainTier::try_from)
}

fn is_subdomain_of(domain: &str, entry: &str) -> bool {
    domain.len() > entry.len()
        && domain.ends_with(entry)
        && domain.as_bytes()[domain.len() - entry.len() - 1] == b'.'
}

/// Normalizes a URL or bare domain to a lowercase hostname without `www.`.
///
/// `"https://www.rappler.com/news/x"` → `"rappler.com"`, `"GMANetwork.com:443"` →
/// `"gmanetwork.com"`. Returns an empty string for empty input.
pub fn extract_domain(url_or_domain: &str) -> String {
    let raw = url_or_domain.trim().to_lowercase();
    if raw.is_empty() {
        return String::new();
    }

    let without_scheme = match raw.find("://") {
        Some(idx) => &raw[idx + 3..],
        None => raw.as_str(),
    };

    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    let host = host.trim_end_matches('.');

    host.strip_prefix("www.").unwrap_or(host).to_string()
}
