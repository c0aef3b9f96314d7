//! Storage traits shared by all entity types

mod repository;

pub use repository::{EntityStore, StoreRecord};

#[cfg(test)]
pub use repository::mock::MockEntityStore;
