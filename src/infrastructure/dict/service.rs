//! Dictionary lookup service

use std::sync::Arc;

use crate::domain::cache::EntityCache;
use crate::domain::context::CallContext;
use crate::domain::dict::{Dict, DictRecord};
use crate::domain::traits::EntityStore;
use crate::domain::DomainError;
use crate::infrastructure::repository::CachedEntityRepository;

/// Store of dictionary records
pub type DictStore = dyn EntityStore<Record = DictRecord>;

/// Cache-aside dictionary repository
pub type DictRepository = CachedEntityRepository<Dict, DictStore>;

/// Dictionary lookups used by the admin API
#[derive(Debug)]
pub struct DictService {
    repository: DictRepository,
}

impl DictService {
    pub fn new(cache: Arc<dyn EntityCache<Dict>>, store: Arc<DictStore>) -> Self {
        Self {
            repository: CachedEntityRepository::new(cache, store),
        }
    }

    pub async fn get_by_id(&self, ctx: &CallContext, id: &str) -> Result<Dict, DomainError> {
        self.repository.get_by_id(ctx, id).await
    }

    pub async fn invalidate(&self, ctx: &CallContext, id: &str) -> Result<(), DomainError> {
        self.repository.invalidate(ctx, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::{CachePolicy, MockCache};
    use crate::domain::dict::{DictType, DictValueType};
    use crate::infrastructure::cache::KeyValueEntityCache;
    use crate::infrastructure::storage::InMemoryEntityStore;

    #[tokio::test]
    async fn test_get_by_id_and_invalidate() {
        let cache = Arc::new(MockCache::new());
        let gateway: Arc<dyn EntityCache<Dict>> = Arc::new(KeyValueEntityCache::<Dict>::new(
            cache.clone(),
            CachePolicy::default(),
        ));
        let store: Arc<DictStore> = Arc::new(InMemoryEntityStore::with_records(vec![
            DictRecord::new("D1", "Yes/No", "yes_no")
                .with_types(DictType::Enum, DictValueType::Bool),
        ]));
        let service = DictService::new(gateway, store);
        let ctx = CallContext::background();

        let dict = service.get_by_id(&ctx, "D1").await.unwrap();
        assert_eq!(dict.dict_type, DictType::Enum);
        assert!(cache.raw("careful:tools:dict:info:D1").is_some());

        service.invalidate(&ctx, "D1").await.unwrap();
        assert!(cache.raw("careful:tools:dict:info:D1").is_none());

        let missing = service.get_by_id(&ctx, "D2").await;
        assert!(missing.unwrap_err().is_not_found());
        assert_eq!(cache.raw("careful:tools:dict:info:D2").as_deref(), Some("not_found"));
    }
}
