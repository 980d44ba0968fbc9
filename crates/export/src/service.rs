use assetdesk_core::export::{export_file_name, validate_export_name};
use assetdesk_db::repositories::AssetRepo;
use assetdesk_storage::Disk;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::ExportError;
use crate::workbook::build_workbook;

/// Where an export landed and how many asset rows it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub disk: String,
    pub path: String,
    pub rows: usize,
}

/// Snapshot every asset, soft-deleted ones included, into
/// `<output>-<unix seconds>.xlsx` on `disk`.
///
/// Nothing is written unless the whole workbook was built.
pub async fn export_assets(
    pool: &PgPool,
    disk: &dyn Disk,
    output: &str,
) -> Result<ExportReport, ExportError> {
    validate_export_name(output).map_err(|e| ExportError::InvalidOutput(e.to_string()))?;

    let assets = AssetRepo::list_all_including_deleted(pool).await?;
    let bytes = build_workbook(&assets)?;
    let path = export_file_name(output, chrono::Utc::now());

    disk.put(&path, bytes).await?;

    tracing::info!(disk = disk.name(), path = %path, rows = assets.len(), "Assets exported");

    Ok(ExportReport {
        disk: disk.name().to_string(),
        path,
        rows: assets.len(),
    })
}
