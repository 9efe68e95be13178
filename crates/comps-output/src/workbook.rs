//! Writing the record table into an `.xlsx` workbook.

use crate::export::ExportError;
use comps_metrics::{Cell, CompanyRecord, column_names};
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Name of the sheet the record table is written to.
pub const STOCK_DATA_SHEET: &str = "Stock Data";

/// Write `records` to the [`STOCK_DATA_SHEET`] of the workbook at `path`.
///
/// An existing workbook is opened and every other sheet is kept as it was;
/// an existing `Stock Data` sheet is dropped and rebuilt from scratch, so
/// nothing of its previous content survives. A missing file is created.
///
/// # Errors
///
/// Returns [`ExportError::Workbook`] if the workbook cannot be read or
/// written.
pub fn write_stock_data(path: &Path, records: &[CompanyRecord]) -> Result<(), ExportError> {
    let mut book = if path.exists() {
        umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            ExportError::Workbook(format!("failed to open {}: {e}", path.display()))
        })?
    } else {
        debug!(path = %path.display(), "creating new workbook");
        umya_spreadsheet::new_file_empty_worksheet()
    };

    replace_sheet(&mut book, STOCK_DATA_SHEET, records)?;

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| {
        ExportError::Workbook(format!("failed to save {}: {e}", path.display()))
    })?;

    info!(
        path = %path.display(),
        sheet = STOCK_DATA_SHEET,
        rows = records.len(),
        "wrote workbook"
    );
    Ok(())
}

/// Drop `name` from `book` if present and write `records` into a fresh sheet
/// of that name.
///
/// A replaced sheet keeps its position among the other sheets; a new one is
/// appended last.
///
/// # Errors
///
/// Returns [`ExportError::Workbook`] if the sheet cannot be removed or added.
pub fn replace_sheet(
    book: &mut Spreadsheet,
    name: &str,
    records: &[CompanyRecord],
) -> Result<(), ExportError> {
    let position = book
        .get_sheet_collection()
        .iter()
        .position(|sheet| sheet.get_name() == name);
    if position.is_some() {
        book.remove_sheet_by_name(name)
            .map_err(|e| ExportError::Workbook(format!("failed to remove sheet {name}: {e}")))?;
    }

    let sheet = book
        .new_sheet(name)
        .map_err(|e| ExportError::Workbook(format!("failed to add sheet {name}: {e}")))?;
    fill_sheet(sheet, records);

    // new_sheet appends; rotate the new last sheet back into the old slot.
    if let Some(index) = position {
        let sheets = book.get_sheet_collection_mut();
        if index < sheets.len() {
            sheets[index..].rotate_right(1);
        }
    }
    Ok(())
}

/// Header on row 1, one record per row below it, no index column.
fn fill_sheet(sheet: &mut Worksheet, records: &[CompanyRecord]) {
    for (col, header) in (1u32..).zip(column_names()) {
        sheet.get_cell_mut((col, 1)).set_value(header);
    }

    for (row, record) in (2u32..).zip(records) {
        for (col, cell) in (1u32..).zip(record.cells()) {
            match cell {
                Cell::Text(text) => {
                    sheet.get_cell_mut((col, row)).set_value(text);
                }
                Cell::Number(n) if n.is_finite() => {
                    sheet.get_cell_mut((col, row)).set_value_number(n);
                }
                Cell::Number(_) | Cell::Empty => {}
            }
        }
    }
}
