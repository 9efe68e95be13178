//! The provider seam used by the valuation pipeline.

use crate::error::Result;
use crate::types::{IncomeStatement, InfoProfile, RevenueEstimates};
use std::future::Future;

/// A read-only source of per-ticker fundamentals.
///
/// Every query is keyed by an already-trimmed symbol. Implementations are
/// free to fail any query independently; callers decide which failures are
/// fatal for a ticker.
pub trait FundamentalsSource {
    /// Key/value company profile.
    fn info(&self, symbol: &str) -> impl Future<Output = Result<InfoProfile>> + Send;

    /// Analyst revenue growth estimates by relative period.
    fn revenue_estimates(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<RevenueEstimates>> + Send;

    /// Annual income statement, newest period first.
    fn income_statement(&self, symbol: &str)
    -> impl Future<Output = Result<IncomeStatement>> + Send;

    /// Called once after all queries for a ticker finished.
    ///
    /// Remote providers use it for pacing. The default does nothing.
    fn finish_ticker(&self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
