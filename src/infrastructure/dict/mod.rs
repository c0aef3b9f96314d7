//! Dictionary infrastructure module

mod postgres_store;
mod service;

pub use postgres_store::PostgresDictStore;
pub use service::{DictRepository, DictService, DictStore};
