//! Cache key construction and the tombstone sentinel

use std::time::Duration;

use crate::domain::DomainError;

/// Value stored under a key whose entity is known to be absent from the store
pub const NOT_FOUND_MARKER: &str = "not_found";

/// Namespace of cached user snapshots
pub const USER_NAMESPACE: &str = "careful:system:user:info";

/// Namespace of cached dictionary snapshots
pub const DICT_NAMESPACE: &str = "careful:tools:dict:info";

/// Builds the cache key for an entity id within a namespace
pub fn entity_key(namespace: &str, id: &str) -> String {
    format!("{}:{}", namespace, id)
}

/// TTL policy for entity snapshots and not-found markers
///
/// The marker TTL is always strictly shorter than the snapshot TTL, so an id
/// that gets created after a miss becomes visible quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    entity_ttl: Duration,
    not_found_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            entity_ttl: Duration::from_secs(15 * 60),
            not_found_ttl: Duration::from_secs(60),
        }
    }
}

impl CachePolicy {
    pub fn new(entity_ttl: Duration, not_found_ttl: Duration) -> Result<Self, DomainError> {
        if not_found_ttl.is_zero() {
            return Err(DomainError::configuration(
                "Not-found marker TTL must be greater than zero",
            ));
        }

        if not_found_ttl >= entity_ttl {
            return Err(DomainError::configuration(format!(
                "Not-found marker TTL ({:?}) must be shorter than entity TTL ({:?})",
                not_found_ttl, entity_ttl
            )));
        }

        Ok(Self {
            entity_ttl,
            not_found_ttl,
        })
    }

    pub fn entity_ttl(&self) -> Duration {
        self.entity_ttl
    }

    pub fn not_found_ttl(&self) -> Duration {
        self.not_found_ttl
    }
}
