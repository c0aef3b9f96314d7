//! User lookup service

use std::sync::Arc;

use tracing::debug;

use crate::domain::cache::EntityCache;
use crate::domain::context::CallContext;
use crate::domain::user::{User, UserStore};
use crate::domain::DomainError;
use crate::infrastructure::repository::CachedEntityRepository;

/// Cache-aside user repository
pub type UserRepository = CachedEntityRepository<User, dyn UserStore>;

/// User lookups used by the admin API
#[derive(Debug)]
pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    pub fn new(cache: Arc<dyn EntityCache<User>>, store: Arc<dyn UserStore>) -> Self {
        Self {
            repository: CachedEntityRepository::new(cache, store),
        }
    }

    /// Gets a user by id, cache first
    pub async fn get_by_id(&self, ctx: &CallContext, id: &str) -> Result<User, DomainError> {
        self.repository.get_by_id(ctx, id).await
    }

    /// Gets a user by login name straight from the store
    ///
    /// Login names are not cached; only id lookups go through the cache.
    pub async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        debug!(username = %username, "Looking up user by username");

        self.repository
            .store()
            .find_by_username(username)
            .await?
            .map(User::from)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' does not exist", username)))
    }

    /// Evicts the cached snapshot of a user
    pub async fn invalidate(&self, ctx: &CallContext, id: &str) -> Result<(), DomainError> {
        self.repository.invalidate(ctx, id).await
    }
}
