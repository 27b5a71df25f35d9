//! Cache Store Module
//!
//! Read-through/write-through cache over a storage backend with lazy,
//! read-time TTL expiry.

use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheKey, CacheStats, Clock, SystemClock};
use crate::error::Result;
use crate::storage::StorageBackend;

// == Expiring Cache ==
/// Stores JSON values under hashed keys, stamping each write with the
/// current time.
///
/// Staleness is decided on read from the entry's write stamp and the TTL on
/// the caller's `CacheKey`, so one record can be read under different
/// freshness policies.
pub struct ExpiringCache {
    /// Persistent key-value storage
    storage: Arc<dyn StorageBackend>,
    /// Source of write stamps and expiry checks
    clock: Arc<dyn Clock>,
    /// Read/write counters
    stats: Mutex<CacheStats>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates a cache over `storage` using the system clock.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock.
    pub fn with_clock(storage: Arc<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            stats: Mutex::new(CacheStats::new()),
        }
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored or the entry is stale under
    /// `key.ttl_minutes`. Stale entries are removed from storage; a failed
    /// removal is logged and otherwise ignored.
    ///
    /// # Errors
    /// Empty key name, backend failures, and records or values that fail to
    /// deserialize.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<T>> {
        let storage_id = key.storage_id()?;

        let Some(raw) = self.storage.read(&storage_id)? else {
            debug!(storage_id = %storage_id, "Cache miss");
            self.update_stats(CacheStats::record_miss);
            return Ok(None);
        };

        let entry = CacheEntry::decode(&raw)?;
        let now = self.clock.now();

        if entry.is_expired(key.effective_ttl(), now) {
            debug!(
                storage_id = %storage_id,
                stored_at = %entry.stored_at,
                ttl_minutes = ?key.ttl_minutes,
                "Cache entry stale, removing"
            );
            if let Err(err) = self.storage.delete(&storage_id) {
                warn!(storage_id = %storage_id, error = %err, "Failed to remove stale cache entry");
            }
            self.update_stats(CacheStats::record_expiration);
            return Ok(None);
        }

        let value = serde_json::from_value(entry.value)?;
        debug!(storage_id = %storage_id, "Cache hit");
        self.update_stats(CacheStats::record_hit);
        Ok(Some(value))
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry is stamped with the current time; `key.ttl_minutes` is
    /// ignored on write.
    pub fn set<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T) -> Result<()> {
        let storage_id = key.storage_id()?;
        let entry = CacheEntry::new(serde_json::to_value(value)?, self.clock.now());

        self.storage.write(&storage_id, &entry.encode()?)?;
        debug!(storage_id = %storage_id, stored_at = %entry.stored_at, "Cache entry written");
        self.update_stats(CacheStats::record_write);
        Ok(())
    }

    // == Remove ==
    /// Removes the entry under `key`. Removing a missing entry succeeds.
    pub fn remove(&self, key: &CacheKey) -> Result<()> {
        let storage_id = key.storage_id()?;
        self.storage.delete(&storage_id)?;
        debug!(storage_id = %storage_id, "Cache entry removed");
        Ok(())
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn update_stats(&self, record: fn(&mut CacheStats)) {
        let mut stats = self
            .stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        record(&mut stats);
    }
}

impl std::fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
