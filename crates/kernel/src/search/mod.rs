//! Recent FAQ search terms.
//!
//! Keeps at most [`MAX_ENTRIES`] terms, most recent first. Repeating a term
//! (ignoring case) moves it to the front instead of adding a duplicate.
//! When a path is configured the list is persisted as a JSON array.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Maximum remembered terms.
pub const MAX_ENTRIES: usize = 5;

/// Bounded, most-recent-first search history.
///
/// Writers hold `writer` across the change and the save, so the file always
/// ends up matching the last change made in memory.
#[derive(Debug, Default)]
pub struct SearchHistory {
    entries: Mutex<VecDeque<String>>,
    writer: tokio::sync::Mutex<()>,
    path: Option<PathBuf>,
}

impl SearchHistory {
    /// In-memory history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History backed by a JSON file. A missing or unreadable file starts
    /// an empty history.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load(&path).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "starting with empty search history");
                VecDeque::new()
            }
        };

        Self {
            entries: Mutex::new(entries),
            writer: tokio::sync::Mutex::new(()),
            path: Some(path),
        }
    }

    /// Remember `term`. Blank terms are ignored; returns whether the list
    /// changed.
    pub async fn record(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        let _writer = self.writer.lock().await;
        let snapshot = {
            let mut entries = self.entries.lock();
            if entries.front().is_some_and(|t| t.to_lowercase() == term.to_lowercase()) {
                return false;
            }
            entries.retain(|t| t.to_lowercase() != term.to_lowercase());
            entries.push_front(term.to_string());
            entries.truncate(MAX_ENTRIES);
            entries.iter().cloned().collect::<Vec<_>>()
        };

        debug!(term = %term, "search recorded");
        self.persist(&snapshot).await;
        true
    }

    /// Terms, most recent first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub async fn remove(&self, term: &str) {
        let _writer = self.writer.lock().await;
        let snapshot = {
            let mut entries = self.entries.lock();
            let term = term.trim().to_lowercase();
            entries.retain(|t| t.to_lowercase() != term);
            entries.iter().cloned().collect::<Vec<_>>()
        };
        self.persist(&snapshot).await;
    }

    pub async fn clear(&self) {
        let _writer = self.writer.lock().await;
        self.entries.lock().clear();
        self.persist(&[]).await;
    }

    async fn persist(&self, entries: &[String]) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = save(path, entries).await {
            warn!(path = %path.display(), error = %e, "failed to persist search history");
        }
    }
}

async fn load(path: &Path) -> Result<VecDeque<String>> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(VecDeque::new());
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut entries: VecDeque<String> =
        serde_json::from_str(&raw).context("search history is not a JSON array")?;
    entries.retain(|t| !t.trim().is_empty());
    entries.truncate(MAX_ENTRIES);
    Ok(entries)
}

async fn save(path: &Path, entries: &[String]) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let json = serde_json::to_string(entries)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
