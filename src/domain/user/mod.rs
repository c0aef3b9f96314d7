//! User domain
//!
//! User records as stored, the password-free snapshot placed in the cache,
//! and the user store trait.

mod entity;
mod repository;

pub use entity::{DeptSummary, Gender, User, UserRecord};
pub use repository::UserStore;
