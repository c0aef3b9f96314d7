//! Application state for shared services

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::infrastructure::dict::DictService;
use crate::infrastructure::user::UserService;

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub dict_service: Arc<DictService>,
    /// Raw cache backend, probed by readiness checks
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        dict_service: Arc<DictService>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            user_service,
            dict_service,
            cache,
        }
    }
}
