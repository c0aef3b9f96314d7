//! Domain layer - entities, cache contracts and audit records

pub mod audit;
pub mod cache;
pub mod context;
pub mod core_fields;
pub mod dict;
pub mod error;
pub mod traits;
pub mod user;

pub use audit::{AuditSink, CacheAuditRecord, CacheOperation};
pub use cache::{Cache, CacheError, CachePolicy, CacheableEntity, EntityCache};
pub use context::{CallContext, CallerIdentity, RequestMeta};
pub use dict::{Dict, DictRecord};
pub use error::DomainError;
pub use traits::{EntityStore, StoreRecord};
pub use user::{User, UserRecord, UserStore};
