//! Cache Key Module
//!
//! Derives stable storage identifiers from logical key names.

use sha2::{Digest, Sha256};

use crate::error::{CacheError, Result};

// == Cache Key ==
/// Identifies a logical cache slot.
///
/// The TTL is a read-side policy: it is only consulted by `get`, never
/// persisted with the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// Logical key name, hashed to form the storage identifier
    pub name: String,
    /// Optional namespace prepended as `prefix_`
    pub prefix: Option<String>,
    /// Freshness window in minutes; unset or <= 0 disables expiry
    pub ttl_minutes: Option<i64>,
}

impl CacheKey {
    // == Constructor ==
    /// Creates a key with no prefix and no TTL.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            ttl_minutes: None,
        }
    }

    /// Sets the storage prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the read-time TTL in minutes.
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = Some(minutes);
        self
    }

    // == Storage Id ==
    /// Returns the identifier the entry is persisted under.
    ///
    /// Fails with `CacheError::EmptyKey` when the name is empty.
    pub fn storage_id(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        let hash = hash_key(&self.name);
        Ok(match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{}_{}", prefix, hash),
            _ => hash,
        })
    }

    /// Returns the TTL when it enables expiry.
    pub fn effective_ttl(&self) -> Option<i64> {
        self.ttl_minutes.filter(|minutes| *minutes > 0)
    }
}

// == Hash Key ==
/// Hashes a logical key name into a fixed-length hex digest.
///
/// The name is JSON-encoded before hashing so that names differing only in
/// escaping never collide.
pub fn hash_key(name: &str) -> String {
    let encoded = serde_json::Value::String(name.to_string()).to_string();
    hex::encode(Sha256::digest(encoded.as_bytes()))
}
