//! Integration tests for the bulk export service.
//!
//! Runs the export against a real database and a temporary local disk.

use std::io::{Cursor, Read};

use assetdesk_core::asset_type::AssetType;
use assetdesk_core::validation::AssetFields;
use assetdesk_db::repositories::AssetRepo;
use assetdesk_export::{export_assets, ExportError};
use assetdesk_storage::local::LocalDisk;
use assetdesk_storage::Disk;
use sqlx::PgPool;

fn fields(name: &str, symbol: &str) -> AssetFields {
    AssetFields {
        name: name.into(),
        symbol: symbol.into(),
        asset_type: AssetType::Token,
        decimals: 18,
        description: format!("{name} description"),
        website: None,
        twitter: None,
        discord: None,
        telegram: None,
    }
}

fn sheet_rows(xlsx: &[u8]) -> usize {
    let mut archive = zip::ZipArchive::new(Cursor::new(xlsx)).unwrap();
    let mut sheet = archive.by_name("xl/worksheets/sheet1.xml").unwrap();
    let mut xml = String::new();
    sheet.read_to_string(&mut xml).unwrap();
    xml.matches("<row ").count()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_with_no_assets_writes_heading_only(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let disk = LocalDisk::new("local", dir.path(), None);

    let report = export_assets(&pool, &disk, "assets").await.unwrap();

    assert_eq!(report.rows, 0);
    assert_eq!(report.disk, "local");
    assert!(report.path.starts_with("assets-") && report.path.ends_with(".xlsx"));

    let bytes = disk.get(&report.path).await.unwrap();
    assert_eq!(sheet_rows(&bytes), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_includes_soft_deleted_assets(pool: PgPool) {
    let btc = AssetRepo::create(&pool, &fields("Bitcoin", "BTC"), None).await.unwrap();
    AssetRepo::create(&pool, &fields("Ethereum", "ETH"), None).await.unwrap();
    AssetRepo::soft_delete(&pool, btc.id).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let disk = LocalDisk::new("local", dir.path(), None);

    let report = export_assets(&pool, &disk, "reports/assets").await.unwrap();

    assert_eq!(report.rows, 2);
    assert!(report.path.starts_with("reports/assets-"));
    let bytes = disk.get(&report.path).await.unwrap();
    assert_eq!(sheet_rows(&bytes), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_rejects_escaping_output_name(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let disk = LocalDisk::new("local", dir.path(), None);

    let err = export_assets(&pool, &disk, "../outside").await.unwrap_err();

    assert!(matches!(err, ExportError::InvalidOutput(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_rejects_backslash_output_name(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let disk = LocalDisk::new("local", dir.path(), None);

    let err = export_assets(&pool, &disk, "a\\b").await.unwrap_err();

    assert!(matches!(err, ExportError::InvalidOutput(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
