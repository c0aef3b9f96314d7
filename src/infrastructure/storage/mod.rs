//! Storage infrastructure - connection pools, row mapping and in-memory stores

mod columns;
mod in_memory;
mod postgres;

pub use columns::{column, core_select, row_to_core};
pub use in_memory::InMemoryEntityStore;
pub use postgres::{connect_pool, PostgresConfig};
