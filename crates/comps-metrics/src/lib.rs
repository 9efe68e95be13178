#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/comps/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod record;
pub mod registry;
pub mod valuation;

pub use record::{Cell, CompanyRecord, RatioColumns, UNKNOWN_COMPANY};
pub use valuation::{ValuationInputs, ValuationRatios, is_usable, ratio};

// Re-export registry types for convenience
pub use registry::{
    COLUMN_COUNT, COLUMNS, ColumnInfo, ColumnKind, column_names, columns_by_kind,
};
