//! Storage backend whose writes and deletes can be made to fail.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{CacheError, Result};
use crate::storage::{MemoryStorage, StorageBackend};

/// Wraps a `MemoryStorage`; reads always go through.
#[derive(Debug, Default)]
pub(crate) struct FailingStorage {
    pub(crate) inner: MemoryStorage,
    fail_write: AtomicBool,
    fail_delete: AtomicBool,
}

impl FailingStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_write.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for FailingStorage {
    fn read(&self, id: &str) -> Result<Option<String>> {
        self.inner.read(id)
    }

    fn write(&self, id: &str, serialized: &str) -> Result<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(CacheError::Storage("quota exceeded".to_string()));
        }
        self.inner.write(id, serialized)
    }

    fn delete(&self, id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(CacheError::Storage("store locked".to_string()));
        }
        self.inner.delete(id)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys()
    }
}
