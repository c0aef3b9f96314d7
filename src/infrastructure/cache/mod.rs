//! Cache infrastructure - key-value backends and entity cache gateways

mod auditing;
mod entity_cache;
mod factory;
mod in_memory;
mod redis;

pub use auditing::AuditingEntityCache;
pub use entity_cache::KeyValueEntityCache;
pub use factory::CacheFactory;
pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
pub use redis::{RedisCache, RedisCacheConfig};
