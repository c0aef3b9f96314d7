use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// A persisted record addressable by a string id
pub trait StoreRecord: Clone + Debug + Send + Sync + 'static {
    fn record_id(&self) -> &str;
}

/// Durable storage for one entity type, the source of truth behind the cache
#[async_trait]
pub trait EntityStore: Send + Sync + Debug {
    type Record: StoreRecord;

    /// Finds a record by id; `Ok(None)` means the record does not exist
    async fn find_by_id(&self, id: &str) -> Result<Option<Self::Record>, DomainError>;
}
