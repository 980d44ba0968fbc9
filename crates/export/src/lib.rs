//! Bulk export of every asset record (soft-deleted included) to an XLSX
//! workbook written to a named storage disk.

pub mod args;
pub mod error;
pub mod service;
pub mod workbook;

pub use error::ExportError;
pub use service::{export_assets, ExportReport};
pub use workbook::build_workbook;
