use async_trait::async_trait;

use crate::error::StorageError;

/// A named place files can be written to and read back from.
///
/// Paths are always relative, `/`-separated and free of `..` segments; use
/// [`normalize_path`] before handing user-derived paths to a disk.
#[async_trait]
pub trait Disk: Send + Sync {
    /// Name the disk is registered under (e.g. `public`, `cloud`).
    fn name(&self) -> &str;

    /// Write `bytes` to `path`, creating or overwriting it.
    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Read the whole file at `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Remove the file at `path`. Removing a missing file is not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Browser-facing URL of the file at `path`.
    fn url(&self, path: &str) -> String;
}

/// Validate and canonicalise a disk-relative path.
///
/// Strips leading slashes and empty segments, rejects `..`, backslashes and
/// empty results.
pub fn normalize_path(path: &str) -> Result<String, StorageError> {
    if path.contains('\\') {
        return Err(StorageError::InvalidPath(path.to_string()));
    }

    let mut parts = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => continue,
            ".." => return Err(StorageError::InvalidPath(path.to_string())),
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(parts.join("/"))
}

/// Guess a `Content-Type` from a path's extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = path.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
