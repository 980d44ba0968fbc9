use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cloud::S3Disk;
use crate::config::StorageConfig;
use crate::disk::Disk;
use crate::error::StorageError;
use crate::local::LocalDisk;

/// Disk name for the HTTP-served filesystem disk.
pub const PUBLIC_DISK: &str = "public";

/// Disk name for the private filesystem disk.
pub const LOCAL_DISK: &str = "local";

/// Disk name for the S3-compatible object store.
pub const CLOUD_DISK: &str = "cloud";

/// Disks addressable by name.
#[derive(Clone, Default)]
pub struct DiskRegistry {
    disks: BTreeMap<String, Arc<dyn Disk>>,
}

impl DiskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard disks from configuration. The `cloud` disk is only
    /// registered when a bucket is configured.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(LocalDisk::new(
            PUBLIC_DISK,
            &config.public_root,
            Some(config.public_url.clone()),
        )));
        registry.register(Arc::new(LocalDisk::new(LOCAL_DISK, &config.local_root, None)));

        if let Some(cloud) = &config.cloud {
            tracing::info!(bucket = %cloud.bucket, region = %cloud.region, "Cloud disk configured");
            registry.register(Arc::new(S3Disk::connect(CLOUD_DISK, cloud).await));
        }

        registry
    }

    /// Add a disk under its own name, replacing any disk of the same name.
    pub fn register(&mut self, disk: Arc<dyn Disk>) {
        self.disks.insert(disk.name().to_string(), disk);
    }

    /// Look up a disk by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Disk>, StorageError> {
        self.disks
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::UnknownDisk(name.to_string()))
    }

    /// Registered disk names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.disks.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for DiskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskRegistry")
            .field("disks", &self.names())
            .finish()
    }
}
