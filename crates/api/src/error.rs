use assetdesk_core::error::CoreError;
use assetdesk_core::validation::{taken_message, FieldErrors};
use assetdesk_db::models::asset::unique_violation;
use assetdesk_export::ExportError;
use assetdesk_storage::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message returned alongside per-field errors.
const INVALID_FIELDS_MESSAGE: &str = "The given data was invalid.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `assetdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A file storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A bulk export failure.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine-readable code, message and optional per-field reasons.
type Classified = (StatusCode, &'static str, String, Option<FieldErrors>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Storage / export ---
            AppError::Storage(err) => classify_storage_error(err),
            AppError::Export(err) => match err {
                ExportError::InvalidOutput(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
                }
                ExportError::Database(db) => classify_sqlx_error(db),
                ExportError::Storage(storage) => classify_storage_error(storage),
                ExportError::Workbook(e) => {
                    tracing::error!(error = %e, "Workbook error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        None,
    )
}

fn classify_core_error(core: &CoreError) -> Classified {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
            None,
        ),
        CoreError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
        }
        CoreError::InvalidFields(fields) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_FIELDS",
            INVALID_FIELDS_MESSAGE.to_string(),
            Some(fields.clone()),
        ),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_assets_name` / `uq_assets_symbol` map to 422
///   with the colliding field.
/// - Other unique constraint violations (`uq_` prefix) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    if let Some(column) = unique_violation(err) {
        let mut fields = FieldErrors::new();
        fields.add(column.field(), taken_message(column.field()));
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_FIELDS",
            INVALID_FIELDS_MESSAGE.to_string(),
            Some(fields),
        );
    }

    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                        None,
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// Unknown disks are a client mistake; everything else is a 500.
fn classify_storage_error(err: &StorageError) -> Classified {
    match err {
        StorageError::UnknownDisk(name) => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            format!("Unknown storage disk '{name}'"),
            None,
        ),
        other => {
            tracing::error!(error = %other, "Storage error");
            internal()
        }
    }
}
