use std::path::PathBuf;
use std::sync::Arc;

use crate::extract::TextExtractor;
use crate::history::HistoryStore;
use crate::scoring::VerificationEngine;

/// Shared handler state. Cloned per request; everything heavy sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<VerificationEngine>,

    pub extractor: Arc<dyn TextExtractor>,

    pub history: Arc<dyn HistoryStore>,

    /// Directory holding the history log. `None` when history is in memory.
    pub data_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        engine: Arc<VerificationEngine>,
        extractor: Arc<dyn TextExtractor>,
        history: Arc<dyn HistoryStore>,
        data_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            engine,
            extractor,
            history,
            data_dir,
        }
    }

    pub(crate) fn history_writable(&self) -> bool {
        self.data_dir.as_ref().is_none_or(|dir| dir.is_dir())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .field("extractor", &self.extractor.name())
            .field("data_dir", &self.data_dir)
            .finish()
    }
}
