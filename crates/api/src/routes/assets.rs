//! Route definitions for asset records.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /                  -> list_assets
/// POST   /                  -> create_asset
/// POST   /export            -> export_assets
/// GET    /{id}              -> get_asset
/// PUT    /{id}              -> update_asset
/// DELETE /{id}              -> delete_asset (soft)
/// POST   /{id}/restore      -> restore_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route("/export", post(assets::export_assets))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/restore", post(assets::restore_asset))
}
