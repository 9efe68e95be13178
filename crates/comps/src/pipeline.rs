//! Per-ticker fetch and valuation loop.
//!
//! Tickers are processed strictly one after another. A ticker is skipped
//! only when its profile query fails or comes back empty; the estimate and
//! income statement queries degrade to NaN on any error.

use crate::watchlist::Watchlist;
use comps_data::{DataError, FundamentalsSource, InfoProfile, fields, line_items, periods};
use comps_metrics::{CompanyRecord, UNKNOWN_COMPANY, ValuationInputs, ValuationRatios};
use comps_output::RunSummary;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

/// Records produced by a run plus its tally.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// One record per processed ticker, in watchlist order.
    pub records: Vec<CompanyRecord>,
    /// Written and skipped counts.
    pub summary: RunSummary,
}

/// Process every ticker of `watchlist` against `source`.
///
/// Never fails: each ticker error is logged with the symbol, recorded in the
/// summary, and the loop moves on.
pub async fn collect_records<S: FundamentalsSource>(
    source: &S,
    watchlist: &Watchlist,
    progress: Option<&ProgressBar>,
) -> BatchOutcome {
    let mut records = Vec::with_capacity(watchlist.len());
    let mut summary = RunSummary::new();

    info!(tickers = watchlist.len(), "fetching fundamentals");

    for symbol in watchlist {
        if let Some(pb) = progress {
            pb.set_message(symbol.clone());
        }

        match process_ticker(source, symbol).await {
            Ok(record) => {
                records.push(record);
                summary.record_written();
            }
            Err(e) => {
                let report =
                    || warn!(ticker = %symbol, error = %e, "Error fetching data for {symbol}");
                match progress {
                    Some(pb) => pb.suspend(report),
                    None => report(),
                }
                summary.record_skipped(symbol.as_str(), &e);
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
        source.finish_ticker().await;
    }

    BatchOutcome { records, summary }
}

/// Fetch and value a single ticker.
///
/// # Errors
///
/// Returns the profile query's error, or [`DataError::MissingData`] when the
/// profile is empty. Nothing else fails the ticker.
pub async fn process_ticker<S: FundamentalsSource>(
    source: &S,
    symbol: &str,
) -> Result<CompanyRecord, DataError> {
    let info = source.info(symbol).await?;
    if info.is_empty() {
        return Err(DataError::missing(symbol, "no data found"));
    }

    let (growth_current_year, growth_next_year) = match source.revenue_estimates(symbol).await {
        Ok(estimates) => (
            or_nan(symbol, "current-year estimate", estimates.growth(periods::CURRENT_YEAR)),
            or_nan(symbol, "next-year estimate", estimates.growth(periods::NEXT_YEAR)),
        ),
        Err(e) => {
            debug!(ticker = symbol, error = %e, "revenue estimates unavailable");
            (f64::NAN, f64::NAN)
        }
    };

    let gross_profit = or_nan(
        symbol,
        "gross profit",
        source
            .income_statement(symbol)
            .await
            .and_then(|statement| statement.most_recent(line_items::GROSS_PROFIT)),
    );

    Ok(build_record(
        symbol,
        &info,
        growth_current_year,
        growth_next_year,
        gross_profit,
    ))
}

fn or_nan(symbol: &str, what: &str, value: Result<f64, DataError>) -> f64 {
    value.unwrap_or_else(|e| {
        debug!(ticker = symbol, error = %e, "{what} unavailable");
        f64::NAN
    })
}

fn build_record(
    symbol: &str,
    info: &InfoProfile,
    growth_current_year: f64,
    growth_next_year: f64,
    gross_profit: f64,
) -> CompanyRecord {
    let inputs = ValuationInputs {
        enterprise_value: info.number(fields::ENTERPRISE_VALUE),
        ttm_revenue: info.number(fields::TOTAL_REVENUE),
        ttm_revenue_growth: info.number(fields::REVENUE_GROWTH),
        growth_estimate_current_year: growth_current_year,
        gross_profit,
        ebitda_margin: info.number(fields::EBITDA_MARGINS),
    };
    let ratios = ValuationRatios::derive(&inputs);

    CompanyRecord {
        ticker: symbol.to_string(),
        company: info
            .text(fields::LONG_NAME)
            .unwrap_or(UNKNOWN_COMPANY)
            .to_string(),
        price: info.number(fields::CURRENT_PRICE),
        market_cap: info.number(fields::MARKET_CAP),
        enterprise_value: inputs.enterprise_value,
        debt: info.number(fields::TOTAL_DEBT),
        ttm_revenue: inputs.ttm_revenue,
        ttm_revenue_growth: inputs.ttm_revenue_growth,
        revenue_growth_current_year: growth_current_year,
        revenue_growth_next_year: growth_next_year,
        gross_profit,
        gross_margin: info.number(fields::GROSS_MARGINS),
        ebitda: info.number(fields::EBITDA),
        ebitda_margin: inputs.ebitda_margin,
        ratios: ratios.into(),
    }
}
