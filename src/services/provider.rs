//! Remote Provider Traits
//!
//! The network side of the provider services. Implementations own transport,
//! authentication and request shaping; the services only see these calls.

use async_trait::async_trait;

use crate::models::{CurrentUser, TenantProperty, UserProfile};

/// Remote source of the signed-in user's profile.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetches the full profile. `Ok(None)` means the call succeeded but
    /// returned no payload.
    async fn my_properties(&self) -> anyhow::Result<Option<UserProfile>>;

    /// Resolves the signed-in user.
    async fn current_user(&self) -> anyhow::Result<Option<CurrentUser>>;

    /// Writes a single-valued profile property for `login_name`.
    async fn set_single_value_property(
        &self,
        login_name: &str,
        key: &str,
        value: &str,
    ) -> anyhow::Result<()>;
}

/// Remote source of tenant storage entities.
#[async_trait]
pub trait TenantProvider: Send + Sync {
    /// Fetches one storage entity. `Ok(None)` when the tenant has no entity
    /// under `key`.
    async fn storage_entity(&self, key: &str) -> anyhow::Result<Option<TenantProperty>>;
}
