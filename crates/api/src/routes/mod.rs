pub mod assets;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /asset-types                                     list type values and labels
///
/// /assets                                          list, create
/// /assets/export                                   bulk export (POST)
/// /assets/{id}                                     get, update, soft delete
/// /assets/{id}/restore                             restore (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/asset-types", get(handlers::assets::list_asset_types))
        .nest("/assets", assets::router())
}
