//! In-memory TTL cache of retrieval results, keyed by [`evidence_key`].
//!
//! [`evidence_key`]: crate::hashing::evidence_key

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use super::types::EvidenceArticle;

pub struct EvidenceCache {
    entries: Cache<[u8; 32], Arc<Vec<EvidenceArticle>>>,
}

impl EvidenceCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    #[inline]
    pub fn get(&self, key: &[u8; 32]) -> Option<Arc<Vec<EvidenceArticle>>> {
        self.entries.get(key)
    }

    /// Stores a non-empty result (last write wins). Empty results are ignored.
    pub fn insert(&self, key: [u8; 32], articles: Vec<EvidenceArticle>) -> bool {
        if articles.is_empty() {
            return false;
        }
        self.entries.insert(key, Arc::new(articles));
        true
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl std::fmt::Debug for EvidenceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
