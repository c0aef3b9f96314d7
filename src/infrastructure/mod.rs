//! Infrastructure layer - cache backends, stores, audit sinks and services

pub mod audit;
pub mod cache;
pub mod dict;
pub mod logging;
pub mod repository;
pub mod storage;
pub mod user;
