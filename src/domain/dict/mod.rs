//! Data dictionary domain

mod entity;

pub use entity::{Dict, DictRecord, DictType, DictValueType};
