#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/comps/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;
pub mod workbook;

pub use export::{ExportError, ExportFormat, Exporter};
pub use summary::{RunSummary, SkippedTicker};
pub use workbook::{STOCK_DATA_SHEET, replace_sheet, write_stock_data};
