//! Cache Module
//!
//! Persistent JSON cache with hashed storage keys and read-time TTL expiry.

mod clock;
mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{hash_key, CacheKey};
pub use stats::CacheStats;
pub use store::ExpiringCache;
