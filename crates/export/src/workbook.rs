//! XLSX rendering of asset rows.

use assetdesk_core::export::{format_timestamp, EXPORT_HEADINGS, EXPORT_SHEET_NAME};
use assetdesk_db::models::asset::Asset;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

/// Longest text a single cell may hold, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Render `assets` as a single-sheet workbook: one bold heading row, then one
/// row per asset in the given order.
pub fn build_workbook(assets: &[Asset]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, heading) in EXPORT_HEADINGS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *heading, &bold)?;
    }

    for (i, asset) in assets.iter().enumerate() {
        write_row(sheet, i as u32 + 1, asset)?;
    }

    workbook.save_to_buffer()
}

fn write_row(sheet: &mut Worksheet, row: u32, asset: &Asset) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, asset.id.to_string())?;
    sheet.write_string(row, 1, cell_text(&asset.name))?;
    sheet.write_string(row, 2, cell_text(&asset.symbol))?;
    sheet.write_string(row, 3, asset.asset_type.name())?;
    sheet.write_number(row, 4, asset.decimals)?;
    write_optional(sheet, row, 5, asset.logo.as_deref())?;
    sheet.write_string(row, 6, cell_text(&asset.description))?;
    write_optional(sheet, row, 7, asset.website.as_deref())?;
    write_optional(sheet, row, 8, asset.twitter.as_deref())?;
    write_optional(sheet, row, 9, asset.discord.as_deref())?;
    write_optional(sheet, row, 10, asset.telegram.as_deref())?;
    sheet.write_string(row, 11, format_timestamp(asset.created_at))?;
    sheet.write_string(row, 12, format_timestamp(asset.updated_at))?;
    let deleted_at = asset.deleted_at.map(format_timestamp);
    write_optional(sheet, row, 13, deleted_at.as_deref())?;
    Ok(())
}

/// Absent values leave the cell blank.
fn write_optional(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> Result<(), XlsxError> {
    if let Some(value) = value {
        sheet.write_string(row, col, cell_text(value))?;
    }
    Ok(())
}

/// Text longer than a cell can hold is cut at [`MAX_CELL_CHARS`].
fn cell_text(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}
