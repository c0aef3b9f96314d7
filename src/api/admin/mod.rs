//! Admin API endpoints

pub mod dicts;
pub mod users;

use axum::{
    routing::{delete, get},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/cache", delete(users::evict_user))
        .route(
            "/users/by-username/{username}",
            get(users::get_user_by_username),
        )
        .route("/dicts/{dict_id}", get(dicts::get_dict))
        .route("/dicts/{dict_id}/cache", delete(dicts::evict_dict))
}
