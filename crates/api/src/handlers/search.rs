//! Handler for the search endpoint.
//!
//! Normalizes the query string, assembles the engine request with the
//! configured optimization defaults, and shapes the engine's answer into
//! the paginated [`SearchEnvelope`].

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use meilgate_core::search::{SearchEnvelope, SearchQuery};
use meilgate_meili::types::SearchRequest;

use crate::error::{AppError, AppResult};
use crate::query::search_input_from_pairs;
use crate::state::AppState;

/// GET /api/v1/search
///
/// Query parameters: `query` (required), `page`, `limit`, `filters` (JSON
/// object), `sort` (repeatable, one expression per occurrence).
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<SearchEnvelope>> {
    let Query(pairs) = params?;
    let input = search_input_from_pairs(pairs)?;
    let query = SearchQuery::normalize(input, state.config.search.max_limit)?;
    let index_uid = state.index_uid()?;

    if !query.skipped_filters.is_empty() {
        tracing::debug!(
            fields = ?query.skipped_filters,
            "Ignoring filters with unsupported value types",
        );
    }

    let request = SearchRequest::assemble(&query, &state.config.search.optimization);
    let result = state
        .meili
        .search(index_uid, &request)
        .await
        .map_err(AppError::upstream("search failed"))?;

    let (envelope, dropped) = SearchEnvelope::shape(
        &query,
        result.hits,
        result.estimated_total_hits,
        result.processing_time_ms,
        index_uid,
    );
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped search hits that were not JSON objects");
    }

    Ok(Json(envelope))
}
