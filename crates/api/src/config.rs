use assetdesk_core::export::{DEFAULT_EXPORT_DISK, DEFAULT_EXPORT_NAME};
use assetdesk_storage::config::StorageConfig;
use assetdesk_storage::registry::PUBLIC_DISK;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Request body ceiling in bytes (default: 8 MiB).
    pub max_body_bytes: usize,
    /// Disk logos are stored on (default: `public`).
    pub logo_disk: String,
    /// Disk exports are written to when the request names none (default: `cloud`).
    pub export_disk: String,
    /// Export base name when the request names none (default: `assets`).
    pub export_output: String,
    /// Disk roots, URLs and cloud credentials.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `MAX_BODY_BYTES`       | `8388608`                  |
    /// | `LOGO_DISK`            | `public`                   |
    /// | `EXPORT_DISK`          | `cloud`                    |
    /// | `EXPORT_OUTPUT`        | `assets`                   |
    ///
    /// Disk settings are read by [`StorageConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| (8 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let logo_disk = std::env::var("LOGO_DISK").unwrap_or_else(|_| PUBLIC_DISK.into());
        let export_disk = std::env::var("EXPORT_DISK").unwrap_or_else(|_| DEFAULT_EXPORT_DISK.into());
        let export_output =
            std::env::var("EXPORT_OUTPUT").unwrap_or_else(|_| DEFAULT_EXPORT_NAME.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_body_bytes,
            logo_disk,
            export_disk,
            export_output,
            storage: StorageConfig::from_env(),
        }
    }
}
