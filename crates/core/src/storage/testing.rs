//! Store fakes for unit tests.

use super::{KvStore, MemoryStore};
use crate::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Memory store that counts writes and can be told to reject them.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub writes: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Persistence(format!("read of {key} rejected")));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Persistence(format!("write of {key} rejected")));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}
