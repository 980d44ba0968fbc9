use assetdesk_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid export output: {0}")]
    InvalidOutput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
