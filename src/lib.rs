//! Property Cache - persistent client-side cache for remote properties
//!
//! Provides an expiring key-value cache with hashed storage keys and
//! read-time TTL checks, plus cache-first services for user profile and
//! tenant properties.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use cache::{CacheKey, ExpiringCache};
pub use config::{Config, ServiceConfig};
pub use error::{CacheError, ServiceError};
pub use services::{TenantPropertiesService, UserProfileService};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
