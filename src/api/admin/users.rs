//! User admin endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::api::middleware::RequestContext;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// GET /admin/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Admin getting user");

    let user = state.user_service.get_by_id(&ctx, &user_id).await?;
    Ok(Json(user))
}

/// GET /admin/users/by-username/{username}
///
/// Served from the store; login names are never cached.
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(username = %username, "Admin getting user by username");

    let user = state.user_service.get_by_username(&username).await?;
    Ok(Json(user))
}

/// DELETE /admin/users/{user_id}/cache
pub async fn evict_user(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = %user_id, "Admin evicting cached user");

    state.user_service.invalidate(&ctx, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
