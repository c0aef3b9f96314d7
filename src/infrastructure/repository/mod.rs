//! Repositories combining entity caches with their stores

mod cached;

pub use cached::CachedEntityRepository;
