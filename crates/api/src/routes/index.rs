use axum::routing::get;
use axum::Router;

use crate::handlers::index;
use crate::state::AppState;

/// ```text
/// GET /index  -> get_index_info
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/index", get(index::get_index_info))
}
