#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/comps/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;
pub mod watchlist;

// Re-export main types from sub-crates
pub use comps_data as data;
pub use comps_metrics as metrics;
pub use comps_output as output;

pub use pipeline::{BatchOutcome, collect_records, process_ticker};
pub use watchlist::{Watchlist, WatchlistError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
