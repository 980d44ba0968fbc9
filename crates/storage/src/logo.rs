//! Logo file lifecycle: store new uploads, retire replaced ones.
//!
//! The manager only ever writes storage-relative paths under `logos/`.
//! Stored values that are absolute URLs are never touched.

use std::sync::Arc;

use assetdesk_core::logo::{generate_logo_path, is_external_url, LogoImage};

use crate::disk::Disk;
use crate::error::StorageError;

/// Stores and removes logo files on a single disk.
#[derive(Clone)]
pub struct LogoManager {
    disk: Arc<dyn Disk>,
}

impl LogoManager {
    pub fn new(disk: Arc<dyn Disk>) -> Self {
        Self { disk }
    }

    pub fn disk(&self) -> &Arc<dyn Disk> {
        &self.disk
    }

    /// Store an optional upload for a new asset. No upload, no path.
    pub async fn attach(&self, upload: Option<LogoImage>) -> Result<Option<String>, StorageError> {
        match upload {
            Some(image) => self.stage(image).await.map(Some),
            None => Ok(None),
        }
    }

    /// Write `image` under a freshly generated path and return that path.
    pub async fn stage(&self, image: LogoImage) -> Result<String, StorageError> {
        let path = generate_logo_path(image.extension);
        self.disk.put(&path, image.bytes).await?;
        tracing::debug!(disk = self.disk.name(), path = %path, "Logo stored");
        Ok(path)
    }

    /// Remove a staged file whose record write did not happen.
    pub async fn discard(&self, path: &str) {
        if let Err(e) = self.disk.delete(path).await {
            tracing::warn!(disk = self.disk.name(), path, error = %e, "Failed to discard staged logo");
        }
    }

    /// Remove a logo that is no longer referenced.
    ///
    /// External URLs and files that no longer exist are skipped. Failures are
    /// logged, never returned: the record already points elsewhere.
    pub async fn retire(&self, previous: Option<&str>) {
        let Some(previous) = previous.filter(|p| !p.trim().is_empty()) else {
            return;
        };
        if is_external_url(previous) {
            return;
        }

        match self.disk.exists(previous).await {
            Ok(true) => {
                if let Err(e) = self.disk.delete(previous).await {
                    tracing::warn!(disk = self.disk.name(), path = previous, error = %e, "Failed to delete replaced logo");
                } else {
                    tracing::debug!(disk = self.disk.name(), path = previous, "Replaced logo deleted");
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(disk = self.disk.name(), path = previous, error = %e, "Failed to check replaced logo");
            }
        }
    }

    /// Resolve the logo value an asset should carry after an update.
    ///
    /// Without a new upload the existing value is kept as-is, whether or not
    /// the file still exists. With one, the new file is stored first and the
    /// previous stored file is then removed.
    pub async fn replace(
        &self,
        existing: Option<&str>,
        upload: Option<LogoImage>,
    ) -> Result<Option<String>, StorageError> {
        let Some(image) = upload else {
            return Ok(existing.map(str::to_string));
        };
        let path = self.stage(image).await?;
        self.retire(existing).await;
        Ok(Some(path))
    }

    /// Browser-facing URL for a stored logo value.
    pub fn url(&self, logo: &str) -> String {
        if is_external_url(logo) {
            logo.to_string()
        } else {
            self.disk.url(logo)
        }
    }
}
