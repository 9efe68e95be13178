//! Ticker watchlists.
//!
//! A watchlist is the ordered list of symbols to value. It is read from the
//! first sheet of a workbook: row 1 is a free-form title, row 2 the header,
//! and symbols start on row 3 in column A.

use std::path::{Path, PathBuf};
use thiserror::Error;
use umya_spreadsheet::Worksheet;

/// First row holding a ticker (1-based, after the title and header rows).
pub const FIRST_DATA_ROW: u32 = 3;

/// Column holding the tickers (1-based).
pub const TICKER_COLUMN: u32 = 1;

/// Errors that make the input unusable.
#[derive(Debug, Error)]
pub enum WatchlistError {
    /// The workbook could not be opened or parsed.
    #[error("failed to read watchlist {path}: {message}")]
    Read {
        /// Workbook path
        path: PathBuf,
        /// Underlying reader error
        message: String,
    },

    /// The workbook has no sheets.
    #[error("watchlist {0} has no sheets")]
    NoSheets(PathBuf),
}

/// Ordered ticker symbols, trimmed, blanks removed. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Build a watchlist from raw cell values.
    pub fn from_symbols<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = raw
            .into_iter()
            .filter_map(|value| {
                let symbol = value.as_ref().trim();
                (!symbol.is_empty()).then(|| symbol.to_string())
            })
            .collect();
        Self { symbols }
    }

    /// Read column A of `sheet` from [`FIRST_DATA_ROW`] down.
    pub fn from_sheet(sheet: &Worksheet) -> Self {
        let last_row = sheet.get_highest_row();
        Self::from_symbols(
            (FIRST_DATA_ROW..=last_row).map(|row| sheet.get_value((TICKER_COLUMN, row))),
        )
    }

    /// Read the first sheet of the workbook at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError`] if the workbook cannot be read or has no
    /// sheets.
    pub fn from_workbook(path: &Path) -> Result<Self, WatchlistError> {
        let book =
            umya_spreadsheet::reader::xlsx::read(path).map_err(|e| WatchlistError::Read {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let sheet = book
            .get_sheet_collection()
            .first()
            .ok_or_else(|| WatchlistError::NoSheets(path.to_path_buf()))?;

        Ok(Self::from_sheet(sheet))
    }

    /// Symbols in input order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of symbols, duplicates included.
    pub const fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether there is nothing to process.
    pub const fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::trims(&["AAPL", " MSFT ", ""], &["AAPL", "MSFT"])]
    #[case::whitespace_only(&["  ", "\tNVDA\n", " \t "], &["NVDA"])]
    #[case::duplicates_kept(&["AAPL", "MSFT", "AAPL"], &["AAPL", "MSFT", "AAPL"])]
    #[case::all_blank(&["", " "], &[])]
    fn test_from_symbols(#[case] raw: &[&str], #[case] expected: &[&str]) {
        let watchlist = Watchlist::from_symbols(raw);
        assert_eq!(watchlist.symbols(), expected);
        assert_eq!(watchlist.len(), expected.len());
    }

    #[test]
    fn test_iterates_in_order() {
        let watchlist = Watchlist::from_symbols(["MSFT", "AAPL"]);
        let symbols: Vec<&String> = watchlist.into_iter().collect();
        assert_eq!(symbols, ["MSFT", "AAPL"]);
        assert!(!watchlist.is_empty());
    }

    #[test]
    fn test_from_sheet_starts_at_row_3() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut((1, 1)).set_value("SOFTWARE");
        sheet.get_cell_mut((1, 2)).set_value("Ticker");
        sheet.get_cell_mut((1, 3)).set_value("DDOG");

        let watchlist = Watchlist::from_sheet(sheet);

        assert_eq!(watchlist.symbols(), ["DDOG"]);
    }
}
