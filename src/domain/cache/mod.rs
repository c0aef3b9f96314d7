//! Cache domain - key-value cache contract and entity cache gateway

mod entity_cache;
mod key;
mod repository;

pub use entity_cache::{CacheError, CacheableEntity, EntityCache};
pub use key::{entity_key, CachePolicy, DICT_NAMESPACE, NOT_FOUND_MARKER, USER_NAMESPACE};
pub use repository::Cache;

#[cfg(test)]
pub use repository::mock::MockCache;
