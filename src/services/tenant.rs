//! Tenant Properties Service
//!
//! Read-only, cache-first access to tenant storage entities. Each property is
//! cached under its own key.

use std::sync::Arc;

use tracing::warn;

use crate::cache::{CacheKey, ExpiringCache};
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::TenantProperty;
use crate::services::TenantProvider;

const DEFAULT_KEY_PREFIX: &str = "TP";

// == Tenant Properties Service ==
pub struct TenantPropertiesService {
    cache: Arc<ExpiringCache>,
    provider: Option<Arc<dyn TenantProvider>>,
    config: ServiceConfig,
    key_prefix: String,
}

impl TenantPropertiesService {
    /// Creates a service with no provider attached.
    pub fn new(cache: Arc<ExpiringCache>, config: ServiceConfig) -> Self {
        let key_prefix = config
            .key_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());

        Self {
            cache,
            provider: None,
            config,
            key_prefix,
        }
    }

    /// Attaches the remote tenant provider.
    pub fn with_provider(mut self, provider: Arc<dyn TenantProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The cache slot for property `key`.
    pub fn cache_key(&self, key: &str) -> CacheKey {
        CacheKey::new(key)
            .with_prefix(self.key_prefix.clone())
            .with_ttl_minutes(self.config.ttl_minutes)
    }

    // == Get ==
    /// Returns the tenant property stored under `key`.
    ///
    /// # Errors
    /// - `ContextRequired` without a provider
    /// - `KeyRequired` for an empty key
    /// - `NotFound` when the tenant has no such property
    /// - `Transport` when the provider call fails
    pub async fn get(&self, key: &str) -> ServiceResult<TenantProperty> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(ServiceError::ContextRequired)?;
        if key.is_empty() {
            return Err(ServiceError::KeyRequired);
        }

        let log = self.config.enable_log;
        let cache_key = self.cache_key(key);

        if self.config.reads_cache() {
            match self.cache.get::<TenantProperty>(&cache_key) {
                Ok(Some(property)) => {
                    debug_log!(log, key, "Tenant property served from cache");
                    return Ok(property);
                }
                Ok(None) => debug_log!(log, key, "Tenant property not cached"),
                Err(err) => {
                    warn!(key, error = %err, "Cache read failed, fetching tenant property");
                }
            }
        }

        debug_log!(log, key, "Fetching tenant property from provider");
        let property = provider
            .storage_entity(key)
            .await
            .map_err(ServiceError::Transport)?
            .ok_or_else(|| ServiceError::NotFound(key.to_string()))?;

        if self.config.use_local_storage {
            if let Err(err) = self.cache.set(&cache_key, &property) {
                warn!(key, error = %err, "Failed to cache tenant property");
            }
        }

        Ok(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::storage::{FailingStorage, MemoryStorage, StorageBackend};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeTenantProvider {
        entities: HashMap<String, TenantProperty>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeTenantProvider {
        fn with(entries: &[(&str, &str)]) -> Self {
            Self {
                entities: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), TenantProperty::new(*v)))
                    .collect(),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TenantProvider for FakeTenantProvider {
        async fn storage_entity(&self, key: &str) -> anyhow::Result<Option<TenantProperty>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("timeout");
            }
            Ok(self.entities.get(key).cloned())
        }
    }

    fn setup(
        provider: FakeTenantProvider,
        config: ServiceConfig,
    ) -> (
        Arc<MemoryStorage>,
        Arc<ManualClock>,
        Arc<FakeTenantProvider>,
        TenantPropertiesService,
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = Arc::new(ExpiringCache::with_clock(storage.clone(), clock.clone()));
        let provider = Arc::new(provider);
        let service = TenantPropertiesService::new(cache, config).with_provider(provider.clone());
        (storage, clock, provider, service)
    }

    #[tokio::test]
    async fn test_get_caches_per_property() {
        let (storage, _, provider, service) = setup(
            FakeTenantProvider::with(&[("HelpUrl", "https://help"), ("Theme", "dark")]),
            ServiceConfig::default(),
        );

        assert_eq!(service.get("HelpUrl").await.unwrap().value, "https://help");
        assert_eq!(service.get("Theme").await.unwrap().value, "dark");
        assert_eq!(service.get("HelpUrl").await.unwrap().value, "https://help");

        assert_eq!(provider.calls(), 2);
        assert_eq!(storage.len(), 2);
    }

    #[tokio::test]
    async fn test_get_uses_tp_prefix() {
        let (storage, _, _, service) = setup(
            FakeTenantProvider::with(&[("HelpUrl", "https://help")]),
            ServiceConfig::default(),
        );

        service.get("HelpUrl").await.unwrap();
        let keys = storage.keys().unwrap();
        assert!(keys[0].starts_with("TP_"));
    }

    #[tokio::test]
    async fn test_get_refetches_after_ttl() {
        let (_, clock, provider, service) = setup(
            FakeTenantProvider::with(&[("HelpUrl", "https://help")]),
            ServiceConfig::new().with_ttl_minutes(5),
        );

        service.get("HelpUrl").await.unwrap();
        clock.advance(Duration::minutes(5));
        service.get("HelpUrl").await.unwrap();

        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_property() {
        let (storage, _, _, service) =
            setup(FakeTenantProvider::with(&[]), ServiceConfig::default());

        assert!(matches!(
            service.get("Nope").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_get_checks_context_before_key() {
        let cache = Arc::new(ExpiringCache::new(Arc::new(MemoryStorage::new())));
        let service = TenantPropertiesService::new(cache, ServiceConfig::default());

        assert!(matches!(
            service.get("").await,
            Err(ServiceError::ContextRequired)
        ));
    }

    #[tokio::test]
    async fn test_get_empty_key() {
        let (_, _, provider, service) =
            setup(FakeTenantProvider::with(&[]), ServiceConfig::default());

        assert!(matches!(service.get("").await, Err(ServiceError::KeyRequired)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let provider = FakeTenantProvider {
            fail: true,
            ..Default::default()
        };
        let (_, _, _, service) = setup(provider, ServiceConfig::default());

        assert!(matches!(
            service.get("HelpUrl").await,
            Err(ServiceError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_caching_disabled() {
        let (storage, _, provider, service) = setup(
            FakeTenantProvider::with(&[("HelpUrl", "https://help")]),
            ServiceConfig::new().with_local_storage(false),
        );

        service.get("HelpUrl").await.unwrap();
        service.get("HelpUrl").await.unwrap();

        assert_eq!(provider.calls(), 2);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_remote_value() {
        let storage = Arc::new(FailingStorage::new());
        storage.fail_writes(true);
        let cache = Arc::new(ExpiringCache::new(storage.clone()));
        let provider = Arc::new(FakeTenantProvider::with(&[("HelpUrl", "https://help")]));
        let service = TenantPropertiesService::new(cache, ServiceConfig::default())
            .with_provider(provider.clone());

        let property = service.get("HelpUrl").await.unwrap();
        assert_eq!(property.value, "https://help");
        assert!(storage.inner.is_empty());

        // Nothing was cached, so the next read goes back to the provider
        service.get("HelpUrl").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }
}
