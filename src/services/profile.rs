//! User Profile Service
//!
//! Reads the signed-in user's profile through the cache and writes single
//! properties back to the provider.

use std::sync::Arc;

use tracing::warn;

use crate::cache::{CacheKey, ExpiringCache};
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::UserProfile;
use crate::services::ProfileProvider;

const DEFAULT_KEY_NAME: &str = "Profile";
const DEFAULT_KEY_PREFIX: &str = "UPS";

// == User Profile Service ==
/// Cache-first access to the current user's profile.
///
/// The whole profile is cached as one record; property lookups are answered
/// from that record.
pub struct UserProfileService {
    cache: Arc<ExpiringCache>,
    provider: Option<Arc<dyn ProfileProvider>>,
    config: ServiceConfig,
    cache_key: CacheKey,
}

impl UserProfileService {
    // == Constructor ==
    /// Creates a service with no provider attached. Fetches fail with
    /// `ContextRequired` until `with_provider` is called.
    pub fn new(cache: Arc<ExpiringCache>, config: ServiceConfig) -> Self {
        let cache_key = CacheKey::new(
            config
                .key_name
                .clone()
                .unwrap_or_else(|| DEFAULT_KEY_NAME.to_string()),
        )
        .with_prefix(
            config
                .key_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
        )
        .with_ttl_minutes(config.ttl_minutes);

        Self {
            cache,
            provider: None,
            config,
            cache_key,
        }
    }

    /// Attaches the remote profile provider.
    pub fn with_provider(mut self, provider: Arc<dyn ProfileProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The cache slot holding this service's profile record.
    pub fn cache_key(&self) -> &CacheKey {
        &self.cache_key
    }

    fn provider(&self) -> ServiceResult<&Arc<dyn ProfileProvider>> {
        self.provider.as_ref().ok_or(ServiceError::ContextRequired)
    }

    // == Get All ==
    /// Returns the full profile, from cache when fresh.
    ///
    /// # Errors
    /// - `ContextRequired` without a provider
    /// - `NoProperties` when the provider returns nothing
    /// - `Transport` when the provider call fails
    pub async fn get_all(&self) -> ServiceResult<UserProfile> {
        let provider = self.provider()?;
        let log = self.config.enable_log;

        if self.config.reads_cache() {
            debug_log!(log, key = %self.cache_key.name, "Checking cache for user profile");
            match self.cache.get::<UserProfile>(&self.cache_key) {
                Ok(Some(profile)) => {
                    debug_log!(log, key = %self.cache_key.name, "User profile served from cache");
                    return Ok(profile);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(key = %self.cache_key.name, error = %err, "Cache read failed, fetching user profile");
                }
            }
        }

        debug_log!(log, "Fetching user profile from provider");
        let profile = provider
            .my_properties()
            .await
            .map_err(ServiceError::Transport)?
            .ok_or(ServiceError::NoProperties)?;

        if self.config.use_local_storage {
            match self.cache.set(&self.cache_key, &profile) {
                Ok(()) => debug_log!(log, key = %self.cache_key.name, "User profile cached"),
                Err(err) => {
                    warn!(key = %self.cache_key.name, error = %err, "Failed to cache user profile");
                }
            }
        }

        Ok(profile)
    }

    // == Get ==
    /// Returns the value of one profile property, matched case-insensitively.
    ///
    /// # Errors
    /// As `get_all`, plus `KeyRequired` for an empty key,
    /// `NoPropertiesAvailable` when the profile has no property collection and
    /// `NotFound` when no property matches.
    pub async fn get(&self, key: &str) -> ServiceResult<String> {
        self.provider()?;
        if key.is_empty() {
            return Err(ServiceError::KeyRequired);
        }

        let profile = self.get_all().await?;
        match profile.property(key) {
            Some(Some(property)) => {
                debug_log!(self.config.enable_log, key, "Profile property found");
                Ok(property.value.clone())
            }
            Some(None) => {
                debug_log!(self.config.enable_log, key, "Profile property not found");
                Err(ServiceError::NotFound(key.to_string()))
            }
            None => Err(ServiceError::NoPropertiesAvailable),
        }
    }

    // == Set ==
    /// Writes one profile property for the signed-in user.
    ///
    /// The cached profile is removed only after the provider accepts the
    /// write; any earlier failure leaves the cache untouched.
    pub async fn set(&self, key: &str, value: &str) -> ServiceResult<()> {
        let provider = self.provider()?;
        if key.is_empty() {
            return Err(ServiceError::KeyRequired);
        }
        let log = self.config.enable_log;

        let user = provider
            .current_user()
            .await
            .map_err(ServiceError::Transport)?
            .ok_or(ServiceError::NoCurrentUser)?;

        debug_log!(log, login = %user.login_name, key, "Setting profile property");
        provider
            .set_single_value_property(&user.login_name, key, value)
            .await
            .map_err(ServiceError::Transport)?;

        if self.config.use_local_storage {
            match self.cache.remove(&self.cache_key) {
                Ok(()) => debug_log!(log, key = %self.cache_key.name, "Cached user profile invalidated"),
                Err(err) => {
                    warn!(key = %self.cache_key.name, error = %err, "Failed to invalidate cached user profile");
                }
            }
        }

        Ok(())
    }
}
