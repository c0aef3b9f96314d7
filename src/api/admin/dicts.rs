//! Dictionary admin endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::api::middleware::RequestContext;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::dict::Dict;

/// GET /admin/dicts/{dict_id}
pub async fn get_dict(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(dict_id): Path<String>,
) -> Result<Json<Dict>, ApiError> {
    debug!(dict_id = %dict_id, "Admin getting dict");

    let dict = state.dict_service.get_by_id(&ctx, &dict_id).await?;
    Ok(Json(dict))
}

/// DELETE /admin/dicts/{dict_id}/cache
pub async fn evict_dict(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    Path(dict_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(dict_id = %dict_id, "Admin evicting cached dict");

    state.dict_service.invalidate(&ctx, &dict_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
