//! Filesystem-backed disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::disk::{normalize_path, Disk};
use crate::error::StorageError;

/// A disk rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDisk {
    name: String,
    root: PathBuf,
    base_url: Option<String>,
}

impl LocalDisk {
    /// Create a disk rooted at `root`. `base_url` is the public prefix files
    /// are served under, if the directory is exposed over HTTP.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            base_url,
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(normalize_path(path)?))
    }
}

#[async_trait]
impl Disk for LocalDisk {
    fn name(&self) -> &str {
        &self.name
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                disk: self.name.clone(),
                path: path.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let full = self.resolve(path)?;
        Ok(tokio::fs::try_exists(&full).await?)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match &self.base_url {
            Some(base) => format!("{}/{path}", base.trim_end_matches('/')),
            None => self.root.join(path).to_string_lossy().into_owned(),
        }
    }
}
