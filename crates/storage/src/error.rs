#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unknown storage disk '{0}'")]
    UnknownDisk(String),

    #[error("Invalid storage path '{0}'")]
    InvalidPath(String),

    #[error("File not found on disk '{disk}': {path}")]
    NotFound { disk: String, path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote object store rejected or failed the request.
    #[error("Object store error: {0}")]
    Remote(String),
}
