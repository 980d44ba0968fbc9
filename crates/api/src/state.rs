use std::sync::Arc;

use assetdesk_storage::DiskRegistry;

use crate::assets::AssetStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: assetdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Storage disks addressable by name.
    pub disks: Arc<DiskRegistry>,
    /// Asset write/read orchestration.
    pub assets: Arc<AssetStore>,
}
