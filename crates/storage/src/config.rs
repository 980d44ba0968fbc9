use std::path::PathBuf;

/// Disk configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root of the `public` disk, served over HTTP (default: `storage/app/public`).
    pub public_root: PathBuf,
    /// URL prefix the `public` disk is served under (default: `/storage`).
    pub public_url: String,
    /// Root of the private `local` disk (default: `storage/app`).
    pub local_root: PathBuf,
    /// S3-compatible `cloud` disk; `None` when no bucket is configured.
    pub cloud: Option<CloudDiskConfig>,
}

/// Connection settings for the S3-compatible `cloud` disk.
#[derive(Debug, Clone)]
pub struct CloudDiskConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: Option<String>,
    /// Static credentials; when absent the default AWS provider chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Key prefix prepended to every object path.
    pub prefix: String,
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default               |
    /// |---------------------------------|-----------------------|
    /// | `PUBLIC_DISK_ROOT`              | `storage/app/public`  |
    /// | `PUBLIC_DISK_URL`               | `/storage`            |
    /// | `LOCAL_DISK_ROOT`               | `storage/app`         |
    /// | `CLOUD_DISK_BUCKET`             | unset (no cloud disk) |
    /// | `CLOUD_DISK_REGION`             | `us-east-1`           |
    /// | `CLOUD_DISK_ENDPOINT`           | unset                 |
    /// | `CLOUD_DISK_ACCESS_KEY_ID`      | unset                 |
    /// | `CLOUD_DISK_SECRET_ACCESS_KEY`  | unset                 |
    /// | `CLOUD_DISK_PREFIX`             | empty                 |
    pub fn from_env() -> Self {
        let public_root = std::env::var("PUBLIC_DISK_ROOT")
            .unwrap_or_else(|_| "storage/app/public".into())
            .into();
        let public_url = std::env::var("PUBLIC_DISK_URL").unwrap_or_else(|_| "/storage".into());
        let local_root = std::env::var("LOCAL_DISK_ROOT")
            .unwrap_or_else(|_| "storage/app".into())
            .into();

        let cloud = non_empty_var("CLOUD_DISK_BUCKET").map(|bucket| CloudDiskConfig {
            bucket,
            region: non_empty_var("CLOUD_DISK_REGION").unwrap_or_else(|| "us-east-1".into()),
            endpoint: non_empty_var("CLOUD_DISK_ENDPOINT"),
            access_key_id: non_empty_var("CLOUD_DISK_ACCESS_KEY_ID"),
            secret_access_key: non_empty_var("CLOUD_DISK_SECRET_ACCESS_KEY"),
            prefix: std::env::var("CLOUD_DISK_PREFIX").unwrap_or_default(),
        });

        Self {
            public_root,
            public_url,
            local_root,
            cloud,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
