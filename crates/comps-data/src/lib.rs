#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/comps/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod source;
pub mod types;
pub mod yahoo;

pub use error::{DataError, Result};
pub use source::FundamentalsSource;
pub use types::{
    IncomeStatement, InfoProfile, PeriodValue, RevenueEstimates, fields, line_items, periods,
};
pub use yahoo::{YahooConfig, YahooEndpoints, YahooFundamentalsProvider};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
