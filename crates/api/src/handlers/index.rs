//! Handler for the current index overview.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/index
///
/// Return the configured index's stats and full settings exactly as the
/// engine reports them.
pub async fn get_index_info(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let index_uid = state.index_uid()?;

    let stats = state
        .meili
        .index_stats(index_uid)
        .await
        .map_err(AppError::upstream("failed to fetch index stats"))?;

    let settings = state
        .meili
        .index_settings(index_uid)
        .await
        .map_err(AppError::upstream("failed to fetch index settings"))?;

    Ok(Json(json!({
        "index_uid": index_uid,
        "stats": stats,
        "settings": settings,
    })))
}
