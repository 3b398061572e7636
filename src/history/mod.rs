//! Verification history: an append-only log, paginated listings, and trends.
//!
//! The scoring engine records every finished verification through
//! [`HistoryStore::record`]. Recording failures are the caller's to log; they never
//! change a verification result.

pub mod error;
pub mod store;
pub mod trends;
pub mod types;


pub use error::HistoryError;
pub use store::JsonlHistory;
pub use trends::{
    DEFAULT_TREND_DAYS, DEFAULT_TREND_LIMIT, EntityKind, MAX_TREND_DAYS, MAX_TREND_LIMIT,
    TrendingEntity, TrendingTopic, TrendsQuery, TrendsReport, VerdictCounts, VerdictDayPoint,
    compute_trends,
};
pub use types::{
    DEFAULT_PAGE_LIMIT, HistoryEntry, HistoryPage, HistoryQuery, HistorySummary, Layer1Summary,
    Layer2Summary, MAX_PAGE_LIMIT,
};

use async_trait::async_trait;

#[async_trait]
/// Persistence for verification history.
pub trait HistoryStore: Send + Sync {
    /// Appends one entry. Concurrent calls are serialized by the store.
    async fn record(&self, entry: HistoryEntry) -> Result<(), HistoryError>;

    /// Newest-first page, optionally filtered by verdict.
    fn list(&self, query: &HistoryQuery) -> Result<HistoryPage, HistoryError>;

    fn get(&self, id: &str) -> Option<HistoryEntry>;

    /// All entries, oldest first.
    fn snapshot(&self) -> Vec<HistoryEntry>;

    fn trends(&self, query: &TrendsQuery) -> Result<TrendsReport, HistoryError> {
        query.validate()?;
        Ok(compute_trends(&self.snapshot(), query, chrono::Utc::now()))
    }
}
