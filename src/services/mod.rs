//! Property Provider Services
//!
//! Cache-first wrappers around the remote profile and tenant providers.
//!
//! Each fetch checks the expiring cache, falls back to the remote provider on
//! a miss, stale entry or cache error, and repopulates the cache. The cache is
//! best-effort: its failures are logged and never reach the caller.

/// Emits a `debug!` event only when the service was built with logging on.
macro_rules! debug_log {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            tracing::debug!($($arg)+);
        }
    };
}

mod profile;
mod provider;
mod tenant;

pub use profile::UserProfileService;
pub use provider::{ProfileProvider, TenantProvider};
pub use tenant::TenantPropertiesService;
