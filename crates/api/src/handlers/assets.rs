//! Handlers for asset records, their type enumeration and bulk export.
//!
//! Create and update take `multipart/form-data` so the optional `logo` file
//! travels with the text fields. Every mutation returns the affected asset
//! with a one-shot `message`.

use assetdesk_core::asset_type::AssetType;
use assetdesk_core::types::DbId;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::assets::form::read_asset_form;
use crate::error::{AppError, AppResult};
use crate::query::AssetListParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Asset types
// ---------------------------------------------------------------------------

/// One selectable asset type.
#[derive(Debug, Serialize)]
pub struct AssetTypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// GET /api/v1/asset-types
///
/// The type enumeration with display labels, for filter and form dropdowns.
pub async fn list_asset_types() -> Json<DataResponse<Vec<AssetTypeOption>>> {
    let data = AssetType::ALL
        .iter()
        .map(|t| AssetTypeOption {
            value: t.name(),
            label: t.label(),
        })
        .collect();
    Json(DataResponse { data })
}

// ---------------------------------------------------------------------------
// Asset CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/assets
///
/// Active assets ordered by name. `search` matches name, symbol or
/// description; `type` restricts to one type; both apply together.
pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<AssetListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query()?;
    let page = state.assets.list(&query).await?;

    Ok(Json(page))
}

/// POST /api/v1/assets
///
/// Create an asset from a multipart form with an optional `logo` file.
pub async fn create_asset(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (form, upload) = read_asset_form(multipart).await?;
    let asset = state.assets.create(&form, upload).await?;

    tracing::info!(
        asset_id = %asset.id,
        name = %asset.name,
        symbol = %asset.symbol,
        "Asset created",
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            data: state.assets.view(asset),
            message: "Asset created successfully.",
        }),
    ))
}

/// GET /api/v1/assets/{id}
///
/// Soft-deleted assets are returned too, with `deleted_at` set.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = state.assets.get(id).await?;

    Ok(Json(DataResponse {
        data: state.assets.view(asset),
    }))
}

/// PUT /api/v1/assets/{id}
///
/// Replace the editable fields. Omitting `logo` keeps the current one.
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (form, upload) = read_asset_form(multipart).await?;
    let logo_replaced = upload.is_some();
    let asset = state.assets.update(id, &form, upload).await?;

    tracing::info!(
        asset_id = %asset.id,
        name = %asset.name,
        symbol = %asset.symbol,
        logo_replaced,
        "Asset updated",
    );

    Ok(Json(MessageResponse {
        data: state.assets.view(asset),
        message: "Asset updated successfully.",
    }))
}

/// DELETE /api/v1/assets/{id}
///
/// Soft delete: the record is hidden from listing but kept.
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.assets.soft_delete(id).await?;
    let asset = state.assets.get(id).await?;

    tracing::info!(asset_id = %id, "Asset deleted");

    Ok(Json(MessageResponse {
        data: state.assets.view(asset),
        message: "Asset deleted successfully.",
    }))
}

/// POST /api/v1/assets/{id}/restore
///
/// Bring a soft-deleted asset back into listings.
pub async fn restore_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = state.assets.restore(id).await?;

    tracing::info!(asset_id = %id, "Asset restored");

    Ok(Json(MessageResponse {
        data: state.assets.view(asset),
        message: "Asset restored successfully.",
    }))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Optional body for the export trigger.
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    pub output: Option<String>,
    pub disk: Option<String>,
}

/// POST /api/v1/assets/export
///
/// Write every asset, soft-deleted included, to an XLSX file. The JSON body
/// may name the `output` base name and the target `disk`; both default to
/// the server configuration.
pub async fn export_assets(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let request: ExportRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ExportRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
    };

    let output = request
        .output
        .unwrap_or_else(|| state.config.export_output.clone());
    let disk_name = request
        .disk
        .unwrap_or_else(|| state.config.export_disk.clone());

    let disk = state.disks.get(&disk_name)?;
    let report = assetdesk_export::export_assets(&state.pool, disk.as_ref(), &output).await?;

    Ok(Json(DataResponse { data: report }))
}
