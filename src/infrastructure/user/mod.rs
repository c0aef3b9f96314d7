//! User infrastructure module
//!
//! Postgres-backed user store and the cache-aside user service.

mod postgres_store;
mod service;

pub use postgres_store::PostgresUserStore;
pub use service::{UserRepository, UserService};
