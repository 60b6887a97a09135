pub mod health;
pub mod index;
pub mod search;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                   engine liveness probe
/// /index                                    index stats + settings
/// /search                                   paginated search
///
/// /settings/                                read all settings (GET)
/// /settings/searchable-attributes           update (PUT)
/// /settings/filterable-attributes           update (PUT)
/// /settings/sortable-attributes             update (PUT)
/// /settings/ranking-rules                   update (PUT)
/// /settings/reset                           reset all settings (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(index::router())
        .merge(search::router())
        .merge(settings::router())
}
