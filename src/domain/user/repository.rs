//! User store trait

use async_trait::async_trait;

use super::entity::UserRecord;
use crate::domain::traits::EntityStore;
use crate::domain::DomainError;

/// Store of user records
#[async_trait]
pub trait UserStore: EntityStore<Record = UserRecord> {
    /// Finds a user by login name
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::traits::MockEntityStore;

    #[async_trait]
    impl UserStore for MockEntityStore<UserRecord> {
        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserRecord>, DomainError> {
            self.check_should_fail()?;
            Ok(self.records().into_iter().find(|u| u.username == username))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_find_by_username() {
            let store = MockEntityStore::new().with_record(UserRecord::new("u-1", "alice"));

            let found = store.find_by_username("alice").await.unwrap();
            assert_eq!(found.unwrap().core.id, "u-1");

            let missing = store.find_by_username("bob").await.unwrap();
            assert!(missing.is_none());
        }

        #[tokio::test]
        async fn test_find_by_id_counts_lookups() {
            let store = MockEntityStore::new().with_record(UserRecord::new("u-1", "alice"));

            store.find_by_id("u-1").await.unwrap();
            store.find_by_id("u-2").await.unwrap();
            assert_eq!(store.lookup_count(), 2);
        }

        #[tokio::test]
        async fn test_failing_store() {
            let store: MockEntityStore<UserRecord> = MockEntityStore::new();
            store.set_should_fail(true);

            assert!(store.find_by_id("u-1").await.is_err());
            assert!(store.find_by_username("alice").await.is_err());
        }
    }
}
