//! Bounded summary cache keyed by fingerprint.
//!
//! The whole cache is one record in the key-value store, a JSON object
//! mapping fingerprint to `{ summary, timestamp }`. It supports:
//!
//! - Last-write-wins overwrite per fingerprint
//! - A hard entry bound with oldest-first eviction after each insertion
//! - Exactly one wholesale write per `put`

pub mod fingerprint;

pub use fingerprint::Fingerprint;

use crate::storage::{KvStore, load_record, save_record};
use crate::{Clock, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Default entry bound.
pub const MAX_CACHE_SIZE: usize = 50;

/// Record name of the cache collection.
pub const CACHE_KEY: &str = "summaryCache";

/// Stored form of one entry; the fingerprint is the map key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheRecord {
    summary: String,
    timestamp: i64,
}

type CacheMap = BTreeMap<String, CacheRecord>;

/// A cached summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheEntry {
    pub fingerprint: String,
    pub summary: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

impl CacheEntry {
    fn from_record(fingerprint: &str, record: &CacheRecord) -> Self {
        Self { fingerprint: fingerprint.to_string(), summary: record.summary.clone(), timestamp: record.timestamp }
    }
}

/// Fingerprint-keyed summary cache.
///
/// Clones share the store and the write lock, so concurrent `put` calls
/// through clones of one handle are serialized and never lose entries.
#[derive(Clone)]
pub struct SummaryCache {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    max_entries: usize,
    write_lock: Arc<Mutex<()>>,
}

impl SummaryCache {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock, max_entries: MAX_CACHE_SIZE, write_lock: Arc::new(Mutex::new(())) }
    }

    /// Override the entry bound (minimum 1).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Get the entry for a fingerprint.
    ///
    /// Returns None on a miss. Never writes.
    pub async fn lookup(&self, fingerprint: &str) -> Result<Option<CacheEntry>, Error> {
        let map = self.load().await?;
        Ok(map.get(fingerprint).map(|record| CacheEntry::from_record(fingerprint, record)))
    }

    /// Create or overwrite the entry for a fingerprint, then enforce the bound.
    ///
    /// The entry is stamped with the current time, which is returned. Issues
    /// exactly one write of the whole collection; a failed write is returned
    /// as is.
    pub async fn put(&self, fingerprint: &str, summary: &str) -> Result<i64, Error> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;

        let timestamp = self.clock.now_ms();
        map.insert(fingerprint.to_string(), CacheRecord { summary: summary.to_string(), timestamp });

        let evicted = evict_oldest(&mut map, self.max_entries, fingerprint);
        if !evicted.is_empty() {
            tracing::debug!(count = evicted.len(), "evicted oldest cache entries");
        }

        save_record(self.store.as_ref(), CACHE_KEY, &map).await?;
        Ok(timestamp)
    }

    /// Current time on the cache clock, in Unix milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Delete one entry. Returns whether it existed.
    pub async fn remove(&self, fingerprint: &str) -> Result<bool, Error> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(fingerprint).is_none() {
            return Ok(false);
        }
        save_record(self.store.as_ref(), CACHE_KEY, &map).await?;
        Ok(true)
    }

    /// Drop every entry. Returns how many were readable before the reset.
    ///
    /// A corrupt record is overwritten rather than reported, so this is the
    /// recovery path for an undecodable cache.
    pub async fn clear(&self) -> Result<usize, Error> {
        let _guard = self.write_lock.lock().await;
        let removed = match self.load().await {
            Ok(map) => map.len(),
            Err(Error::Corrupt { reason, .. }) => {
                tracing::warn!("resetting corrupt summary cache: {}", reason);
                0
            }
            Err(e) => return Err(e),
        };
        save_record(self.store.as_ref(), CACHE_KEY, &CacheMap::new()).await?;
        Ok(removed)
    }

    /// All entries, newest first.
    pub async fn entries(&self) -> Result<Vec<CacheEntry>, Error> {
        let map = self.load().await?;
        let mut entries: Vec<CacheEntry> = map.iter().map(|(fp, record)| CacheEntry::from_record(fp, record)).collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.fingerprint.cmp(&b.fingerprint)));
        Ok(entries)
    }

    pub async fn len(&self) -> Result<usize, Error> {
        Ok(self.load().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len().await? == 0)
    }

    async fn load(&self) -> Result<CacheMap, Error> {
        load_record(self.store.as_ref(), CACHE_KEY).await
    }
}

/// Keep the newest `max` entries, returning the evicted fingerprints.
///
/// Ties on timestamp: `fresh` (the entry just written) always survives, then
/// the lexicographically smallest fingerprint goes first.
fn evict_oldest(map: &mut CacheMap, max: usize, fresh: &str) -> Vec<String> {
    if map.len() <= max {
        return Vec::new();
    }

    let mut ranked: Vec<(&String, &CacheRecord)> = map.iter().collect();
    ranked.sort_by(|(a_fp, a), (b_fp, b)| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| (b_fp.as_str() == fresh).cmp(&(a_fp.as_str() == fresh)))
            .then_with(|| b_fp.cmp(a_fp))
    });
    let evicted: Vec<String> = ranked.into_iter().skip(max).map(|(fp, _)| fp.clone()).collect();

    for fp in &evicted {
        map.remove(fp);
    }
    evicted
}
