//! Cache Entry Module
//!
//! Defines the persisted record: a value plus the time it was written.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// == Cache Entry ==
/// A single persisted cache record.
///
/// `stored_at` is stamped once by the writer and never touched again; a later
/// write replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// The stored value
    pub value: serde_json::Value,
    /// Write timestamp
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped at `now`.
    pub fn new(value: serde_json::Value, now: DateTime<Utc>) -> Self {
        Self {
            value,
            stored_at: now,
        }
    }

    // == Expires At ==
    /// Returns the moment this entry goes stale under a TTL of `ttl_minutes`.
    ///
    /// `None` when the expiry falls outside the representable range.
    pub fn expires_at(&self, ttl_minutes: i64) -> Option<DateTime<Utc>> {
        Duration::try_minutes(ttl_minutes).and_then(|ttl| self.stored_at.checked_add_signed(ttl))
    }

    // == Is Expired ==
    /// Checks the entry against a read-time TTL.
    ///
    /// An entry is stale once `now >= stored_at + ttl`. A TTL of `None` or
    /// `<= 0` never expires.
    pub fn is_expired(&self, ttl_minutes: Option<i64>, now: DateTime<Utc>) -> bool {
        match ttl_minutes {
            Some(ttl) if ttl > 0 => self.expires_at(ttl).is_some_and(|expiry| now >= expiry),
            _ => false,
        }
    }

    // == Encoding ==
    /// Serializes the record for a storage backend.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a record read back from a storage backend.
    pub fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
