//! Data Models
//!
//! Payload shapes exchanged with the remote properties providers and stored
//! in the cache.

mod profile;
mod tenant;

pub use profile::{CurrentUser, ProfileProperty, UserProfile};
pub use tenant::TenantProperty;
