//! Core types and shared functionality for gist.
//!
//! This crate provides:
//! - Persistent key-value store adapter with SQLite and in-memory backends
//! - Summary cache (bounded, fingerprint-keyed)
//! - Summary history (deduplicated, time-windowed)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod storage;

pub use cache::{CacheEntry, Fingerprint, SummaryCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::Error;
pub use history::{HistoryItem, SummaryHistory};
pub use storage::{KvStore, MemoryStore, SqliteStore};

use std::sync::Arc;

/// Cache and history opened over the same store.
///
/// The UI layer holds one of these and clones the handles it needs; the two
/// collections stay independently consistent.
#[derive(Clone)]
pub struct SummaryStore {
    pub cache: SummaryCache,
    pub history: SummaryHistory,
}

impl SummaryStore {
    /// Build both collections from the loaded configuration.
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, config: &config::AppConfig) -> Self {
        Self {
            cache: SummaryCache::new(store.clone(), clock.clone()).with_max_entries(config.max_cache_size),
            history: SummaryHistory::new(store, clock).with_retention(config.retention()),
        }
    }

    /// Destroy every cache entry and history item.
    ///
    /// The cache is cleared first; if that write fails the history is left
    /// untouched.
    pub async fn clear_all(&self) -> Result<(), Error> {
        self.cache.clear().await?;
        self.history.clear().await?;
        tracing::debug!("cleared summary cache and history");
        Ok(())
    }
}
