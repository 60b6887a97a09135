//! Route definitions for index settings management.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes, registered with their full `/settings` paths.
///
/// ```text
/// GET  /settings                          -> get_settings
/// GET  /settings/                         -> get_settings
/// PUT  /settings/searchable-attributes    -> update_searchable_attributes
/// PUT  /settings/filterable-attributes    -> update_filterable_attributes
/// PUT  /settings/sortable-attributes      -> update_sortable_attributes
/// PUT  /settings/ranking-rules            -> update_ranking_rules
/// POST /settings/reset                    -> reset_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings::get_settings))
        .route("/settings/", get(settings::get_settings))
        .route(
            "/settings/searchable-attributes",
            put(settings::update_searchable_attributes),
        )
        .route(
            "/settings/filterable-attributes",
            put(settings::update_filterable_attributes),
        )
        .route(
            "/settings/sortable-attributes",
            put(settings::update_sortable_attributes),
        )
        .route("/settings/ranking-rules", put(settings::update_ranking_rules))
        .route("/settings/reset", post(settings::reset_settings))
}
