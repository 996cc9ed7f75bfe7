//! Spreadsheet export.

use std::path::Path;

use anyhow::Context;
use looker_core::PlaceRecord;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

const SHEET_NAME: &str = "Places";

/// Write `records` to a single-sheet `.xlsx` file at `path`.
///
/// Row 0 holds [`PlaceRecord::COLUMNS`]; absent values are left blank.
pub(crate) fn write_spreadsheet(path: &Path, records: &[PlaceRecord]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    fill_sheet(sheet, records)?;
    workbook
        .save(path)
        .with_context(|| format!("failed to save spreadsheet {}", path.display()))?;
    Ok(())
}

fn fill_sheet(sheet: &mut Worksheet, records: &[PlaceRecord]) -> anyhow::Result<()> {
    sheet.set_name(SHEET_NAME)?;
    let header = Format::new().set_bold();
    for (col, title) in (0u16..).zip(PlaceRecord::COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, record) in (1u32..).zip(records) {
        write_row(sheet, row, record)?;
    }
    sheet.autofit();
    Ok(())
}

fn write_row(sheet: &mut Worksheet, row: u32, r: &PlaceRecord) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, &r.place_id)?;
    write_text(sheet, row, 1, r.name.as_deref())?;
    write_text(sheet, row, 2, r.address.as_deref())?;
    write_text(sheet, row, 3, r.phone.as_deref())?;
    write_text(sheet, row, 4, r.website.as_deref())?;
    write_num(sheet, row, 5, r.latitude)?;
    write_num(sheet, row, 6, r.longitude)?;
    write_num(sheet, row, 7, r.rating)?;
    write_num(sheet, row, 8, r.rating_count.map(f64::from))?;
    sheet.write_string(row, 9, &r.category)?;
    sheet.write_string(row, 10, &r.search_origin)?;
    Ok(())
}

fn write_text(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> Result<(), XlsxError> {
    if let Some(value) = value {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

fn write_num(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> Result<(), XlsxError> {
    if let Some(value) = value {
        sheet.write_number(row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> PlaceRecord {
        PlaceRecord {
            place_id: id.to_owned(),
            name: Some("Casa Nova".to_owned()),
            address: Some("Rua Augusta 1, Lisboa".to_owned()),
            phone: None,
            website: None,
            latitude: Some(38.71),
            longitude: Some(-9.14),
            rating: Some(4.4),
            rating_count: Some(213),
            category: "Real Estate Agencies".to_owned(),
            search_origin: "38.7, -9.1".to_owned(),
        }
    }

    #[test]
    fn writes_a_nonempty_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.xlsx");

        write_spreadsheet(&path, &[record("a"), record("b")]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives.
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn header_only_workbook_for_empty_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        write_spreadsheet(&path, &[]).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("places.xlsx");

        let err = write_spreadsheet(&path, &[record("a")]).unwrap_err();
        assert!(err.to_string().contains("failed to save spreadsheet"));
    }
}
