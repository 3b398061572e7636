//! Rule-based stance detection.
//!
//! Rules run in a fixed order and the first match wins:
//!
//! 1. URL on a known Philippine fact-check domain → `Refutes` (0.90)
//! 2. similarity below [`NEI_SIMILARITY_FLOOR`] → `NotEnoughInfo` (0.80)
//! 3. any refutation keyword → `Refutes`, 0.65 + 0.10 per hit, capped at 0.95
//! 4. any support keyword and similarity ≥ [`SUPPORT_SIMILARITY_GATE`] → `Supports`,
//!    0.50 + 0.10 per hit + 0.20 × similarity, capped at 0.90
//! 5. otherwise `NotEnoughInfo` (0.70)

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::{EvidenceArticle, Stance, StanceResult};
use crate::constants::round_to;

/// Below this similarity an article cannot support or refute the claim.
pub const NEI_SIMILARITY_FLOOR: f64 = 0.15;

/// Minimum similarity for support keywords to count.
pub const SUPPORT_SIMILARITY_GATE: f64 = 0.35;

/// Checked as substrings of the lowercased article URL, in this order.
pub const FACT_CHECK_DOMAINS: &[&str] = &[
    "vera-files.org",
    "verafiles.org",
    "factcheck.afp.com",
    "rappler.com/newsbreak/fact-check",
    "cnn.ph/fact-check",
];

const REFUTATION_KEYWORDS: &[&str] = &[
    r"\bfact.?check\b",
    r"\bfalse\b",
    r"\bfake\b",
    r"\bhoax\b",
    r"\bdebunked\b",
    r"\bmisinformation\b",
    r"\bdisinformation\b",
    r"\bnot true\b",
    r"\bno evidence\b",
    r"\bunverified\b",
    r"\bcorrection\b",
    r"\bretract\b",
    r"\bwrong\b",
    r"\bdenied\b",
    r"\bscam\b",
    r"\bsatire\b",
    r"\bkasinungalingan\b",
    r"\bhindi totoo\b",
    r"\bpeke\b",
];

const SUPPORT_KEYWORDS: &[&str] = &[
    r"\bconfirmed\b",
    r"\bverified\b",
    r"\bofficial\b",
    r"\bproven\b",
    r"\btrue\b",
    r"\blegitimate\b",
    r"\baccurate\b",
    r"\bauthorized\b",
    r"\breal\b",
    r"\bgenuine\b",
    r"\btotoo\b",
    r"\bkumpirmado\b",
    r"\bopisyal\b",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
        .collect()
}

static REFUTATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(REFUTATION_KEYWORDS));
static SUPPORT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(SUPPORT_KEYWORDS));

/// First match of each pattern, in pattern order.
fn scan(text: &str, patterns: &[Regex]) -> Vec<String> {
    patterns
        .iter()
        .filter_map(|re| re.find(text).map(|m| m.as_str().to_string()))
        .collect()
}

fn preview(hits: &[String]) -> String {
    hits.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
}

/// Stateless stance detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct StanceClassifier;

impl StanceClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Decides the stance of one article towards `claim`.
    pub fn detect(
        &self,
        claim: &str,
        title: &str,
        description: &str,
        url: &str,
        similarity: f64,
    ) -> StanceResult {
        let result = Self::apply_rules(title, description, url, similarity);
        debug!(
            claim_len = claim.len(),
            url = %url,
            similarity,
            stance = %result.stance,
            confidence = result.confidence,
            reason = %result.reason,
            "Stance detected"
        );
        result
    }

    /// [`detect`](Self::detect) on a retrieved article, matching fact-check domains
    /// against both its link and its publisher URL.
    pub fn detect_article(
        &self,
        claim: &str,
        article: &EvidenceArticle,
        similarity: f64,
    ) -> StanceResult {
        self.detect(
            claim,
            &article.title,
            &article.description,
            &article.urls(),
            similarity,
        )
    }

    fn apply_rules(title: &str, description: &str, url: &str, similarity: f64) -> StanceResult {
        let url_lower = url.to_lowercase();
        if !url_lower.is_empty()
            && let Some(domain) = FACT_CHECK_DOMAINS.iter().find(|d| url_lower.contains(*d))
        {
            return StanceResult {
                stance: Stance::Refutes,
                confidence: 0.90,
                matched_keywords: vec![domain.to_string()],
                reason: "Known Philippine fact-check domain".to_string(),
            };
        }

        if similarity < NEI_SIMILARITY_FLOOR {
            return StanceResult {
                stance: Stance::NotEnoughInfo,
                confidence: 0.80,
                matched_keywords: Vec::new(),
                reason: format!("Low similarity ({similarity:.2}), article not related to claim"),
            };
        }

        let article_text = format!("{title} {description}").to_lowercase();

        let refutation_hits = scan(&article_text, &REFUTATION_PATTERNS);
        if !refutation_hits.is_empty() {
            let confidence = (0.65 + 0.10 * refutation_hits.len() as f64).min(0.95);
            return StanceResult {
                stance: Stance::Refutes,
                confidence: round_to(confidence, 2),
                reason: format!("Refutation signal detected: {}", preview(&refutation_hits)),
                matched_keywords: refutation_hits,
            };
        }

        let support_hits = scan(&article_text, &SUPPORT_PATTERNS);
        if !support_hits.is_empty() && similarity >= SUPPORT_SIMILARITY_GATE {
            let confidence =
                (0.50 + 0.10 * support_hits.len() as f64 + 0.20 * similarity).min(0.90);
            return StanceResult {
                stance: Stance::Supports,
                confidence: round_to(confidence, 2),
                reason: format!(
                    "Support signal + similarity {similarity:.2}: {}",
                    preview(&support_hits)
                ),
                matched_keywords: support_hits,
            };
        }

        StanceResult {
            stance: Stance::NotEnoughInfo,
            confidence: 0.70,
            matched_keywords: Vec::new(),
            reason: "No conclusive support or refutation signals found".to_string(),
        }
    }
}
