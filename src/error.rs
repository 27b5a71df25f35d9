//! Error types for the property cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the expiring cache store and its storage backends.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Logical key name was empty
    #[error("Cache key name must not be empty")]
    EmptyKey,

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend refused the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem failure in a directory-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Service Error Enum ==
/// Errors surfaced by the property provider services.
///
/// Cache failures never appear here; the services treat them as misses.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No remote provider was attached to the service
    #[error("contextRequired")]
    ContextRequired,

    /// Empty property key
    #[error("keyRequired")]
    KeyRequired,

    /// Remote fetch succeeded but the requested key is absent
    #[error("notFound: {0}")]
    NotFound(String),

    /// Remote payload lacks the expected property collection
    #[error("noPropertiesAvailable")]
    NoPropertiesAvailable,

    /// Remote provider returned nothing
    #[error("noProperties")]
    NoProperties,

    /// Remote provider could not resolve the current user
    #[error("noCurrentUser")]
    NoCurrentUser,

    /// Opaque failure of the remote call
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),
}

// == Result Type Aliases ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_codes() {
        assert_eq!(ServiceError::ContextRequired.to_string(), "contextRequired");
        assert_eq!(ServiceError::KeyRequired.to_string(), "keyRequired");
        assert_eq!(
            ServiceError::NotFound("WorkEmail".to_string()).to_string(),
            "notFound: WorkEmail"
        );
    }

    #[test]
    fn test_transport_keeps_source() {
        let err = ServiceError::Transport(anyhow::anyhow!("connection reset"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_cache_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CacheError = json_err.into();
        assert!(matches!(err, CacheError::Serialization(_)));
    }
}
