//! Aggregates over recorded verifications.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::error::HistoryError;
use super::types::HistoryEntry;
use crate::constants::{round_to, truncate_chars};
use crate::scoring::Verdict;

pub const DEFAULT_TREND_DAYS: u32 = 7;
pub const MAX_TREND_DAYS: u32 = 90;
pub const DEFAULT_TREND_LIMIT: usize = 10;
pub const MAX_TREND_LIMIT: usize = 50;

/// Claims are grouped into topics by this many leading characters.
const TOPIC_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Org,
    Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingEntity {
    pub entity: String,
    pub entity_type: EntityKind,
    pub count: usize,
    /// Mentions in entries judged Likely Fake or Unverified.
    pub fake_count: usize,
    pub fake_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub count: usize,
    pub dominant_verdict: Verdict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerdictCounts {
    #[serde(rename = "Credible")]
    pub credible: usize,
    #[serde(rename = "Unverified")]
    pub unverified: usize,
    #[serde(rename = "Likely Fake")]
    pub likely_fake: usize,
}

impl VerdictCounts {
    fn add(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Credible => self.credible += 1,
            Verdict::Unverified => self.unverified += 1,
            Verdict::LikelyFake => self.likely_fake += 1,
        }
    }

    /// Most frequent verdict; ties resolve Credible, then Unverified.
    fn dominant(&self) -> Verdict {
        let mut best = (Verdict::Credible, self.credible);
        for candidate in [
            (Verdict::Unverified, self.unverified),
            (Verdict::LikelyFake, self.likely_fake),
        ] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictDayPoint {
    /// `YYYY-MM-DD` (UTC).
    pub date: String,
    pub credible: usize,
    pub unverified: usize,
    pub fake: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsReport {
    pub top_entities: Vec<TrendingEntity>,
    pub top_topics: Vec<TrendingTopic>,
    pub verdict_distribution: VerdictCounts,
    pub verdict_by_day: Vec<VerdictDayPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendsQuery {
    /// Lookback window.
    pub days: u32,
    /// Maximum entities and topics returned.
    pub limit: usize,
}

impl Default for TrendsQuery {
    fn default() -> Self {
        Self {
            days: DEFAULT_TREND_DAYS,
            limit: DEFAULT_TREND_LIMIT,
        }
    }
}

impl TrendsQuery {
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.days == 0 || self.days > MAX_TREND_DAYS {
            return Err(HistoryError::InvalidQuery {
                reason: format!("days must be between 1 and {MAX_TREND_DAYS}"),
            });
        }
        if self.limit == 0 || self.limit > MAX_TREND_LIMIT {
            return Err(HistoryError::InvalidQuery {
                reason: format!("limit must be between 1 and {MAX_TREND_LIMIT}"),
            });
        }
        Ok(())
    }
}

/// Counter that remembers first-seen order for tie-breaking.
struct Tally<K> {
    order: Vec<K>,
    counts: HashMap<K, usize>,
}

impl<K: Clone + Eq + std::hash::Hash> Tally<K> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, key: K) {
        let count = self.counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            self.order.push(key);
        }
        *count += 1;
    }

    fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Highest counts first; equal counts keep first-seen order.
    fn most_common(&self, limit: usize) -> Vec<(K, usize)> {
        let mut ranked: Vec<(K, usize)> = self
            .order
            .iter()
            .map(|k| (k.clone(), self.get(k)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

/// Builds the report from entries newer than `now - query.days`.
pub fn compute_trends(
    entries: &[HistoryEntry],
    query: &TrendsQuery,
    now: DateTime<Utc>,
) -> TrendsReport {
    let cutoff = now - Duration::days(i64::from(query.days));
    let recent = entries.iter().filter(|e| e.timestamp >= cutoff);

    let mut entities: Tally<(String, EntityKind)> = Tally::new();
    let mut fake_mentions: Tally<(String, EntityKind)> = Tally::new();
    let mut topics: Tally<String> = Tally::new();
    let mut topic_verdicts: HashMap<String, VerdictCounts> = HashMap::new();
    let mut distribution = VerdictCounts::default();
    let mut by_day: BTreeMap<String, VerdictCounts> = BTreeMap::new();

    for entry in recent {
        let is_fake = matches!(entry.verdict, Verdict::LikelyFake | Verdict::Unverified);
        let named = entry
            .entities
            .persons
            .iter()
            .map(|p| (p, EntityKind::Person))
            .chain(entry.entities.organizations.iter().map(|o| (o, EntityKind::Org)))
            .chain(entry.entities.locations.iter().map(|l| (l, EntityKind::Location)));
        for (name, kind) in named {
            let key = (name.clone(), kind);
            if is_fake {
                fake_mentions.add(key.clone());
            }
            entities.add(key);
        }

        let claim = entry.claim_used.trim();
        if !claim.is_empty() {
            let topic = truncate_chars(claim, TOPIC_CHARS).to_string();
            topic_verdicts
                .entry(topic.clone())
                .or_default()
                .add(entry.verdict);
            topics.add(topic);
        }

        distribution.add(entry.verdict);
        by_day
            .entry(entry.timestamp.format("%Y-%m-%d").to_string())
            .or_default()
            .add(entry.verdict);
    }

    let top_entities = entities
        .most_common(query.limit)
        .into_iter()
        .map(|(key, count)| {
            let fake_count = fake_mentions.get(&key);
            TrendingEntity {
                entity: key.0,
                entity_type: key.1,
                count,
                fake_count,
                fake_ratio: round_to(fake_count as f64 / count as f64, 2),
            }
        })
        .collect();

    let top_topics = topics
        .most_common(query.limit)
        .into_iter()
        .map(|(topic, count)| {
            let dominant_verdict = topic_verdicts
                .get(&topic)
                .map_or(Verdict::Unverified, VerdictCounts::dominant);
            TrendingTopic {
                topic,
                count,
                dominant_verdict,
            }
        })
        .collect();

    let verdict_by_day = by_day
        .into_iter()
        .map(|(date, counts)| VerdictDayPoint {
            date,
            credible: counts.credible,
            unverified: counts.unverified,
            fake: counts.likely_fake,
        })
        .collect();

    TrendsReport {
        top_entities,
        top_topics,
        verdict_distribution: distribution,
        verdict_by_day,
    }
}
