use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetdesk_export::args::ExportArgs;
use assetdesk_storage::config::StorageConfig;
use assetdesk_storage::DiskRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assetdesk_export=info,asset_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Arguments ---
    let args = match ExportArgs::from_env_defaults().parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };
    tracing::info!(output = %args.output, disk = %args.disk, "Starting asset export");

    // --- Storage ---
    let disks = DiskRegistry::from_config(&StorageConfig::from_env()).await;
    let disk = disks
        .get(&args.disk)
        .with_context(|| format!("Export disk '{}' is not available", args.disk))?;

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = assetdesk_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    // --- Export ---
    let report = assetdesk_export::export_assets(&pool, disk.as_ref(), &args.output)
        .await
        .context("Asset export failed")?;

    tracing::info!(
        disk = %report.disk,
        path = %report.path,
        rows = report.rows,
        url = %disk.url(&report.path),
        "Export complete"
    );
    Ok(())
}
