use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::HistoryStore;
use super::error::HistoryError;
use super::types::{HistoryEntry, HistoryPage, HistoryQuery, HistorySummary};

struct Inner {
    /// Insertion order, oldest first.
    entries: Vec<HistoryEntry>,
    file: Option<File>,
}

/// Append-only JSON-lines history with an in-memory mirror.
///
/// Appends hold one mutex for the file write and the mirror update, so concurrent
/// recorders never interleave lines.
#[derive(Clone)]
pub struct JsonlHistory {
    path: Option<PathBuf>,
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for JsonlHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlHistory")
            .field("path", &self.path)
            .field("entries", &self.inner.lock().entries.len())
            .finish()
    }
}

impl JsonlHistory {
    /// Opens (creating if needed) the log at `path` and loads existing entries.
    /// Malformed lines are skipped with a warning.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        let io_err = |source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let entries = if path.exists() {
            load_entries(path)?
        } else {
            Vec::new()
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;

        info!(
            path = %path.display(),
            entries = entries.len(),
            "History log opened"
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            inner: Arc::new(Mutex::new(Inner {
                entries,
                file: Some(file),
            })),
        })
    }

    /// No backing file; entries live for the process lifetime only.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: Arc::new(Mutex::new(Inner {
                entries: Vec::new(),
                file: None,
            })),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut inner = self.inner.lock();
        if let Some(file) = inner.file.as_mut() {
            file.write_all(line.as_bytes())
                .and_then(|_| file.flush())
                .map_err(|source| HistoryError::Io {
                    path: self.path.clone().unwrap_or_default(),
                    source,
                })?;
        }
        debug!(id = %entry.id, verdict = %entry.verdict, "History entry recorded");
        inner.entries.push(entry);
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<Vec<HistoryEntry>, HistoryError> {
    let file = File::open(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HistoryEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(
                path = %path.display(),
                line = lineno + 1,
                error = %e,
                "Skipping malformed history line"
            ),
        }
    }
    Ok(entries)
}

#[async_trait]
impl HistoryStore for JsonlHistory {
    async fn record(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.append(entry))
            .await
            .map_err(|e| HistoryError::Task {
                reason: e.to_string(),
            })?
    }

    fn list(&self, query: &HistoryQuery) -> Result<HistoryPage, HistoryError> {
        query.validate()?;

        let inner = self.inner.lock();
        let matching: Vec<&HistoryEntry> = inner
            .entries
            .iter()
            .rev()
            .filter(|e| query.verdict.is_none_or(|v| e.verdict == v))
            .collect();

        let start = (query.page - 1).saturating_mul(query.limit);
        let entries = matching
            .iter()
            .skip(start)
            .take(query.limit)
            .map(|e| HistorySummary::from(*e))
            .collect();

        Ok(HistoryPage {
            total: matching.len(),
            page: query.page,
            limit: query.limit,
            entries,
        })
    }

    fn get(&self, id: &str) -> Option<HistoryEntry> {
        self.inner
            .lock()
            .entries
            .iter()
            .rev()
            .find(|e| e.id == id)
            .cloned()
    }

    fn snapshot(&self) -> Vec<HistoryEntry> {
        self.inner.lock().entries.clone()
    }
}
