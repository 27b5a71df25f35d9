//! Configuration Module
//!
//! Per-instance service configuration and the CLI's environment settings.

use std::env;
use std::path::PathBuf;

/// Default freshness window for provider services, in minutes.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

// == Service Config ==
/// Immutable settings for one provider service instance.
///
/// Unset prefix and key name fall back to the service's own defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Consult and populate the local cache
    pub use_local_storage: bool,
    /// Storage prefix for this service's cache records
    pub key_prefix: Option<String>,
    /// Cache slot name for services that cache one record
    pub key_name: Option<String>,
    /// Freshness window in minutes; <= 0 disables cache reads
    pub ttl_minutes: i64,
    /// Emit debug events for each step of a fetch
    pub enable_log: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            use_local_storage: true,
            key_prefix: None,
            key_name: None,
            ttl_minutes: DEFAULT_TTL_MINUTES,
            enable_log: false,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_storage(mut self, enabled: bool) -> Self {
        self.use_local_storage = enabled;
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_key_name(mut self, name: impl Into<String>) -> Self {
        self.key_name = Some(name.into());
        self
    }

    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = minutes;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_log = enabled;
        self
    }

    /// Whether a fetch should try the cache before the remote provider.
    pub fn reads_cache(&self) -> bool {
        self.use_local_storage && self.ttl_minutes > 0
    }
}

// == CLI Config ==
/// Settings for the `property-cache` binary.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the cache records
    pub cache_dir: PathBuf,
    /// Prefix applied to every key
    pub prefix: Option<String>,
    /// TTL applied to reads when none is given on the command line
    pub ttl_minutes: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Record directory (default: `.property-cache`)
    /// - `CACHE_PREFIX` - Key prefix (default: none)
    /// - `CACHE_TTL_MINUTES` - Read TTL in minutes (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            prefix: env::var("CACHE_PREFIX").ok().filter(|v| !v.is_empty()),
            ttl_minutes: env::var("CACHE_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_minutes),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".property-cache"),
            prefix: None,
            ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }
}
