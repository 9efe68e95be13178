//! Run summary: which tickers made it into the table and which were skipped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ticker that was dropped from the output, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedTicker {
    /// Ticker symbol as read from the watchlist.
    pub ticker: String,

    /// Error message that caused the skip.
    pub reason: String,
}

impl fmt::Display for SkippedTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.ticker, self.reason)
    }
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// Tickers attempted.
    pub attempted: usize,

    /// Records produced.
    pub written: usize,

    /// Tickers dropped from the output, in processing order.
    pub skipped: Vec<SkippedTicker>,
}

impl RunSummary {
    /// Start a new summary stamped with the current time.
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    /// Start a new summary with an explicit start time.
    pub const fn started_at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            attempted: 0,
            written: 0,
            skipped: Vec::new(),
        }
    }

    /// Count a ticker that produced a record.
    pub const fn record_written(&mut self) {
        self.attempted += 1;
        self.written += 1;
    }

    /// Count a ticker that was skipped.
    pub fn record_skipped(&mut self, ticker: impl Into<String>, reason: impl fmt::Display) {
        self.attempted += 1;
        self.skipped.push(SkippedTicker {
            ticker: ticker.into(),
            reason: reason.to_string(),
        });
    }

    /// Whether every attempted ticker produced a record.
    pub const fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} tickers written", self.written, self.attempted)?;
        if !self.skipped.is_empty() {
            let tickers: Vec<&str> = self.skipped.iter().map(|s| s.ticker.as_str()).collect();
            write!(f, " ({} skipped: {})", self.skipped.len(), tickers.join(", "))?;
        }
        Ok(())
    }
}
