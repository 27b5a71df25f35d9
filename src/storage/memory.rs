//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CacheError, Result};
use crate::storage::StorageBackend;

/// A process-local map. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .map(|records| records.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::Storage("memory storage lock poisoned".to_string())
}

impl StorageBackend for MemoryStorage {
    fn read(&self, id: &str) -> Result<Option<String>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    fn write(&self, id: &str, serialized: &str) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(id.to_string(), serialized.to_string());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.remove(id);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let records = self.records.read().map_err(poisoned)?;
        let mut keys: Vec<String> = records.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
