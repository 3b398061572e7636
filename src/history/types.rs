use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::HistoryError;
use crate::constants::{HISTORY_PREVIEW_CHARS, truncate_chars};
use crate::scoring::{EntitiesResult, InputType, Language, VerificationResult, Verdict};

/// Default and maximum page sizes for history listings.
pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer1Summary {
    pub verdict: Verdict,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer2Summary {
    pub verdict: Verdict,
    pub evidence_score: f64,
    #[serde(default)]
    pub source_count: usize,
}

/// One line of the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub input_type: InputType,
    pub text_preview: String,
    pub verdict: Verdict,
    pub confidence: f64,
    pub final_score: f64,
    #[serde(default)]
    pub entities: EntitiesResult,
    #[serde(default)]
    pub claim_used: String,
    pub layer1: Layer1Summary,
    pub layer2: Layer2Summary,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub emotion: String,
    pub language: Language,
}

impl HistoryEntry {
    /// Flattens a finished verification, with a fresh id and the current time.
    pub fn from_result(result: &VerificationResult, text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            input_type: result.input_type,
            text_preview: truncate_chars(text, HISTORY_PREVIEW_CHARS).to_string(),
            verdict: result.verdict,
            confidence: result.confidence,
            final_score: result.final_score,
            entities: result.entities.clone(),
            claim_used: result.layer2.claim_used.clone(),
            layer1: Layer1Summary {
                verdict: result.layer1.verdict,
                confidence: result.layer1.confidence,
            },
            layer2: Layer2Summary {
                verdict: result.layer2.verdict,
                evidence_score: result.layer2.evidence_score,
                source_count: result.layer2.sources.len(),
            },
            sentiment: result.sentiment.clone(),
            emotion: result.emotion.clone(),
            language: result.language,
        }
    }
}

/// Listing view of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub input_type: InputType,
    pub text_preview: String,
    pub verdict: Verdict,
    pub confidence: f64,
    pub final_score: f64,
}

impl From<&HistoryEntry> for HistorySummary {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            timestamp: entry.timestamp,
            input_type: entry.input_type,
            text_preview: entry.text_preview.clone(),
            verdict: entry.verdict,
            confidence: entry.confidence,
            final_score: entry.final_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryQuery {
    /// 1-based.
    pub page: usize,
    pub limit: usize,
    pub verdict: Option<Verdict>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            verdict: None,
        }
    }
}

impl HistoryQuery {
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.page == 0 {
            return Err(HistoryError::InvalidQuery {
                reason: "page must be at least 1".to_string(),
            });
        }
        if self.limit == 0 || self.limit > MAX_PAGE_LIMIT {
            return Err(HistoryError::InvalidQuery {
                reason: format!("limit must be between 1 and {MAX_PAGE_LIMIT}"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPage {
    /// Matching entries across all pages.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub entries: Vec<HistorySummary>,
}
