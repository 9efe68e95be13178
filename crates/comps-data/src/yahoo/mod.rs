//! Yahoo Finance data provider.

pub mod fundamentals;
pub mod session;

pub use fundamentals::{YahooConfig, YahooFundamentalsProvider};
pub use session::YahooEndpoints;
