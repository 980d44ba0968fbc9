//! Export file layout and naming.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default output base name for exports.
pub const DEFAULT_EXPORT_NAME: &str = "assets";

/// Default disk exports are written to.
pub const DEFAULT_EXPORT_DISK: &str = "cloud";

/// Worksheet name inside the workbook.
pub const EXPORT_SHEET_NAME: &str = "Assets";

/// Column headings, in the order every row is written.
pub const EXPORT_HEADINGS: [&str; 14] = [
    "ID",
    "Asset name",
    "Symbol",
    "Type",
    "Decimals",
    "Logo",
    "Description",
    "Website",
    "Twitter",
    "Discord",
    "Telegram",
    "Created at",
    "Updated at",
    "Deleted at",
];

/// Timestamp rendering used in exported cells.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reject output names that are empty or would escape the target disk.
pub fn validate_export_name(base: &str) -> Result<(), CoreError> {
    let base = base.trim();
    if base.is_empty() {
        return Err(CoreError::Validation("Export output name must not be empty".into()));
    }
    if base.contains('\\') {
        return Err(CoreError::Validation(format!(
            "Export output name '{base}' must use '/' as the path separator"
        )));
    }
    if base.starts_with('/') || base.split('/').any(|part| part == "..") {
        return Err(CoreError::Validation(format!(
            "Export output name '{base}' must be a relative path without '..'"
        )));
    }
    Ok(())
}

/// `<base>-<unix seconds>.xlsx`
pub fn export_file_name(base: &str, now: Timestamp) -> String {
    format!("{}-{}.xlsx", base.trim(), now.timestamp())
}

/// Render a timestamp for an export cell.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.format(EXPORT_TIMESTAMP_FORMAT).to_string()
}
