//! Summary history.
//!
//! An insertion-ordered log of produced summaries, stored as one JSON array
//! record. Items are deduplicated by exact `text` and pruned by age.
//!
//! Pruning is lazy: only `append` drops items older than the retention
//! window, so a stale item stays visible through `list` until the next
//! append.

use crate::storage::{KvStore, load_record, save_record};
use crate::{Clock, Error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default age past which items are pruned.
pub const RETENTION_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Record name of the history collection.
pub const HISTORY_KEY: &str = "summaryHistory";

/// One produced summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HistoryItem {
    /// Summary content; also the dedup key.
    pub text: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    /// Page the summary was generated from.
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Deduplicated, time-windowed summary log.
#[derive(Clone)]
pub struct SummaryHistory {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    retention_ms: i64,
    write_lock: Arc<Mutex<()>>,
}

impl SummaryHistory {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            retention_ms: RETENTION_WINDOW.as_millis() as i64,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention_ms = i64::try_from(retention.as_millis()).unwrap_or(i64::MAX);
        self
    }

    /// Record a summary.
    ///
    /// Returns false without writing when an item with the same text already
    /// exists. Otherwise appends, prunes expired items and persists the list.
    pub async fn append(&self, text: &str, source_url: Option<&str>) -> Result<bool, Error> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;

        if items.iter().any(|item| item.text == text) {
            tracing::debug!("history already contains this summary");
            return Ok(false);
        }

        let now = self.clock.now_ms();
        items.push(HistoryItem { text: text.to_string(), timestamp: now, source_url: source_url.map(str::to_string) });

        let cutoff = now.saturating_sub(self.retention_ms);
        let before = items.len();
        items.retain(|item| item.timestamp >= cutoff);
        if items.len() < before {
            tracing::debug!(pruned = before - items.len(), "pruned expired history items");
        }

        save_record(self.store.as_ref(), HISTORY_KEY, &items).await?;
        Ok(true)
    }

    /// Delete every item whose text matches exactly. Returns how many went.
    ///
    /// Nothing is written when no item matches.
    pub async fn remove(&self, text: &str) -> Result<usize, Error> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;

        let before = items.len();
        items.retain(|item| item.text != text);
        let removed = before - items.len();
        if removed == 0 {
            return Ok(0);
        }

        save_record(self.store.as_ref(), HISTORY_KEY, &items).await?;
        Ok(removed)
    }

    /// Items in storage order (oldest append first).
    pub async fn list(&self) -> Result<Vec<HistoryItem>, Error> {
        self.load().await
    }

    /// Items newest first, for display.
    pub async fn list_recent_first(&self) -> Result<Vec<HistoryItem>, Error> {
        let mut items = self.load().await?;
        items.reverse();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(items)
    }

    /// Empty the collection.
    pub async fn clear(&self) -> Result<(), Error> {
        let _guard = self.write_lock.lock().await;
        save_record(self.store.as_ref(), HISTORY_KEY, &Vec::<HistoryItem>::new()).await
    }

    async fn load(&self) -> Result<Vec<HistoryItem>, Error> {
        load_record(self.store.as_ref(), HISTORY_KEY).await
    }
}
