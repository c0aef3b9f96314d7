//! Entity-aware cache contract

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::domain::context::CallContext;
use crate::domain::DomainError;

/// A read-optimized entity snapshot that can be placed in the cache
pub trait CacheableEntity:
    Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Stable key namespace shared by every reader and writer of this entity
    const NAMESPACE: &'static str;

    /// Human readable entity name used in errors and logs
    const KIND: &'static str;

    /// Identifier the entity is cached under
    fn cache_id(&self) -> &str;
}

/// Errors returned by an [`EntityCache`]
#[derive(Debug, Error)]
pub enum CacheError {
    /// The key is not present in the cache
    #[error("cache key does not exist")]
    Miss,

    /// The cache backend failed; the inner error is returned unmodified
    #[error("cache backend error: {0}")]
    Backend(#[source] DomainError),

    #[error("failed to serialize cache value: {0}")]
    Serialize(String),

    /// The stored payload could not be read back, usually a schema mismatch
    #[error("failed to deserialize cache value for '{key}': {message}")]
    Deserialize { key: String, message: String },
}

impl CacheError {
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// Cache gateway for one entity type
///
/// `get` distinguishes three outcomes:
/// - `Err(CacheError::Miss)`: nothing cached for the id
/// - `Ok(None)`: the id is known to be absent from the store
/// - `Ok(Some(entity))`: a cached snapshot
#[async_trait]
pub trait EntityCache<E: CacheableEntity>: Send + Sync + Debug {
    async fn get(&self, ctx: &CallContext, id: &str) -> Result<Option<E>, CacheError>;

    async fn set(&self, ctx: &CallContext, entity: &E) -> Result<(), CacheError>;

    /// Deletes the entry; deleting an absent key succeeds
    async fn delete(&self, ctx: &CallContext, id: &str) -> Result<(), CacheError>;

    /// Marks the id as known-missing for a short period
    async fn set_not_found(&self, ctx: &CallContext, id: &str) -> Result<(), CacheError>;

    fn key(&self, id: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_is_miss() {
        assert!(CacheError::Miss.is_miss());
        assert!(!CacheError::Backend(DomainError::cache("down")).is_miss());
    }

    #[test]
    fn test_backend_error_keeps_source_message() {
        let error = CacheError::Backend(DomainError::cache("connection refused"));
        assert_eq!(
            error.to_string(),
            "cache backend error: Cache error: connection refused"
        );
    }
}
