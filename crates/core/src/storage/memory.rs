//! In-memory record store.

use super::KvStore;
use crate::Error;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.records.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
