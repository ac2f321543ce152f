//! Persistent key-value store for named records.
//!
//! The cache and history never reach for a global store; they are handed an
//! `Arc<dyn KvStore>`. Records are JSON text, read and written wholesale.
//!
//! - `SqliteStore`: durable, WAL-mode SQLite via tokio-rusqlite
//! - `MemoryStore`: process-local map for tests and ephemeral hosts

pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::Error;
use serde::{Serialize, de::DeserializeOwned};

/// Async get/set over named records.
///
/// No ordering or transaction guarantees across keys; a `set` replaces the
/// whole record (last write wins).
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Read a record. Returns None if it has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replace a record.
    async fn set(&self, key: &str, value: String) -> Result<(), Error>;
}

/// Read and decode a record, falling back to the empty collection.
pub async fn load_record<T>(store: &dyn KvStore, key: &str) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        Some(json) => serde_json::from_str(&json).map_err(|e| Error::Corrupt { key: key.to_string(), reason: e.to_string() }),
        None => Ok(T::default()),
    }
}

/// Encode and write a whole record.
pub async fn save_record<T>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), Error>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| Error::Persistence(format!("failed to encode {key}: {e}")))?;
    store.set(key, json).await
}
