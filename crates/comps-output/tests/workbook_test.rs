//! Integration tests for the Stock Data sheet writer.

use comps_metrics::{CompanyRecord, column_names};
use comps_output::{STOCK_DATA_SHEET, write_stock_data};
use std::path::Path;
use umya_spreadsheet::Worksheet;

fn record(ticker: &str, ev: f64) -> CompanyRecord {
    let mut record = CompanyRecord::empty(ticker);
    record.company = format!("{ticker} Inc.");
    record.enterprise_value = ev;
    record.ttm_revenue = 100.0;
    record.ratios.ev_to_ttm_revenue = ev / 100.0;
    record
}

fn sheet<'a>(book: &'a umya_spreadsheet::Spreadsheet, name: &str) -> Option<&'a Worksheet> {
    book.get_sheet_collection()
        .iter()
        .find(|sheet| sheet.get_name() == name)
}

fn seed_workbook(path: &Path) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    let tickers = book.new_sheet("Tickers").unwrap();
    tickers.get_cell_mut((1, 1)).set_value("Watchlist");
    tickers.get_cell_mut((1, 2)).set_value("Ticker");
    tickers.get_cell_mut((1, 3)).set_value("AAPL");

    let stale = book.new_sheet(STOCK_DATA_SHEET).unwrap();
    stale.get_cell_mut((1, 1)).set_value("Old Header");
    for row in 2..=6 {
        stale.get_cell_mut((1, row)).set_value(format!("OLD{row}"));
        stale.get_cell_mut((25, row)).set_value("stale");
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

#[test]
fn test_replaces_existing_sheet_and_keeps_others() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Book1.xlsx");
    seed_workbook(&path);

    write_stock_data(&path, &[record("AAPL", 200.0), record("MSFT", 300.0)]).unwrap();

    let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();

    let tickers = sheet(&book, "Tickers").unwrap();
    assert_eq!(tickers.get_value((1, 1)), "Watchlist");
    assert_eq!(tickers.get_value((1, 3)), "AAPL");

    let data = sheet(&book, STOCK_DATA_SHEET).unwrap();
    assert_eq!(data.get_highest_row(), 3);
    for (col, header) in (1u32..).zip(column_names()) {
        assert_eq!(data.get_value((col, 1)), header);
    }
    assert_eq!(data.get_value((1, 2)), "AAPL");
    assert_eq!(data.get_value((2, 2)), "AAPL Inc.");
    assert_eq!(data.get_value((1, 3)), "MSFT");
    assert_eq!(data.get_value((5, 3)).parse::<f64>().unwrap(), 300.0);
    assert_eq!(data.get_value((15, 3)).parse::<f64>().unwrap(), 3.0);

    // Missing values are blank, and nothing of the old sheet survives.
    assert_eq!(data.get_value((3, 2)), "");
    assert_eq!(data.get_value((1, 4)), "");
    assert_eq!(data.get_value((25, 2)), "");
}

fn sheet_names(book: &umya_spreadsheet::Spreadsheet) -> Vec<String> {
    book.get_sheet_collection()
        .iter()
        .map(|sheet| sheet.get_name().to_string())
        .collect()
}

#[test]
fn test_replaced_sheet_keeps_its_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ordered.xlsx");

    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    book.new_sheet("Tickers").unwrap();
    let stale = book.new_sheet(STOCK_DATA_SHEET).unwrap();
    stale.get_cell_mut((1, 2)).set_value("OLD");
    let notes = book.new_sheet("Notes").unwrap();
    notes.get_cell_mut((1, 1)).set_value("keep me");
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

    write_stock_data(&path, &[record("AAPL", 200.0)]).unwrap();

    let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    assert_eq!(sheet_names(&book), ["Tickers", STOCK_DATA_SHEET, "Notes"]);
    assert_eq!(sheet(&book, STOCK_DATA_SHEET).unwrap().get_value((1, 2)), "AAPL");
    assert_eq!(sheet(&book, "Notes").unwrap().get_value((1, 1)), "keep me");
}

#[test]
fn test_creates_missing_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.xlsx");

    write_stock_data(&path, &[record("NVDA", 50.0)]).unwrap();

    let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    assert_eq!(book.get_sheet_collection().len(), 1);
    let data = sheet(&book, STOCK_DATA_SHEET).unwrap();
    assert_eq!(data.get_value((1, 1)), "Ticker");
    assert_eq!(data.get_value((1, 2)), "NVDA");
}

#[test]
fn test_empty_table_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    write_stock_data(&path, &[]).unwrap();

    let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    let data = sheet(&book, STOCK_DATA_SHEET).unwrap();
    assert_eq!(data.get_highest_row(), 1);
    assert_eq!(data.get_value((19, 1)), "Rule of 40");
}

#[test]
fn test_unreadable_workbook_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    assert!(write_stock_data(&path, &[record("AAPL", 1.0)]).is_err());
}
