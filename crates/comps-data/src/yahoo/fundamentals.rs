//! Fundamental data fetching from Yahoo Finance.

use super::session::{YahooEndpoints, YahooSession};
use crate::error::{DataError, Result};
use crate::source::FundamentalsSource;
use crate::types::{
    IncomeStatement, InfoProfile, PeriodValue, RevenueEstimates, line_items, raw_number,
};
use chrono::{Months, NaiveDate, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// quoteSummary modules merged into the info profile, in precedence order.
const INFO_MODULES: &[&str] = &[
    "price",
    "summaryDetail",
    "financialData",
    "defaultKeyStatistics",
    "quoteType",
];

/// Annual timeseries keys and the line item names they populate.
const STATEMENT_SERIES: &[(&str, &str)] = &[
    ("annualTotalRevenue", line_items::TOTAL_REVENUE),
    ("annualGrossProfit", line_items::GROSS_PROFIT),
    ("annualEBITDA", line_items::EBITDA),
];

/// How far back the income statement request reaches.
const STATEMENT_LOOKBACK_MONTHS: u32 = 60;

/// Configuration for [`YahooFundamentalsProvider`].
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Host base URLs
    pub endpoints: YahooEndpoints,
    /// Pause after each ticker (default: 500ms)
    pub rate_limit_delay: Duration,
    /// Per-request timeout (default: 30s)
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            endpoints: YahooEndpoints::default(),
            rate_limit_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Yahoo Finance fundamentals provider.
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    session: YahooSession,
    config: YahooConfig,
}

impl std::fmt::Debug for YahooFundamentalsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooFundamentalsProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl YahooFundamentalsProvider {
    /// Create a provider against the public Yahoo hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a provider with custom endpoints, pacing and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: YahooConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            session: YahooSession::default(),
            config,
        })
    }

    /// Provider configuration.
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// GET `url` with the session crumb appended, re-authenticating once on 401.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        match self.get_json_once(url).await {
            Err(e) if e.is_unauthorized() => {
                debug!(url, "crumb rejected, refreshing session");
                self.session.invalidate().await;
                self.get_json_once(url).await
            }
            other => other,
        }
    }

    async fn get_json_once<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let crumb = self
            .session
            .crumb(&self.client, &self.config.endpoints)
            .await?;
        let separator = if url.contains('?') { '&' } else { '?' };
        let request_url = format!("{url}{separator}crumb={}", urlencoding::encode(&crumb));

        let response = self
            .client
            .get(&request_url)
            .header(reqwest::header::REFERER, "https://finance.yahoo.com/")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the first quoteSummary result for `symbol` with the given modules.
    async fn quote_summary(&self, symbol: &str, modules: &str) -> Result<Map<String, Value>> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules={}",
            self.config.endpoints.query2,
            urlencoding::encode(symbol),
            modules
        );
        let response: QuoteSummaryResponse = self.get_json(&url).await?;
        response.into_first_result(symbol)
    }
}

fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    Ok(())
}

impl FundamentalsSource for YahooFundamentalsProvider {
    async fn info(&self, symbol: &str) -> Result<InfoProfile> {
        validate_symbol(symbol)?;
        let result = self.quote_summary(symbol, &INFO_MODULES.join(",")).await?;
        let profile = flatten_modules(symbol, &result);

        if profile.is_empty() {
            return Err(DataError::missing(symbol, "no data found"));
        }
        Ok(profile)
    }

    async fn revenue_estimates(&self, symbol: &str) -> Result<RevenueEstimates> {
        validate_symbol(symbol)?;
        let result = self.quote_summary(symbol, "earningsTrend").await?;
        parse_earnings_trend(symbol, &result)
    }

    async fn income_statement(&self, symbol: &str) -> Result<IncomeStatement> {
        validate_symbol(symbol)?;
        let now = Utc::now();
        let start = now
            .checked_sub_months(Months::new(STATEMENT_LOOKBACK_MONTHS))
            .unwrap_or(now);
        let types = STATEMENT_SERIES
            .iter()
            .map(|(key, _)| *key)
            .collect::<Vec<_>>()
            .join(",");
        let encoded = urlencoding::encode(symbol);
        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{encoded}?symbol={encoded}&type={types}&period1={}&period2={}",
            self.config.endpoints.query2,
            start.timestamp(),
            now.timestamp(),
        );

        let response: TimeseriesResponse = self.get_json(&url).await?;
        parse_timeseries(symbol, response)
    }

    async fn finish_ticker(&self) {
        if !self.config.rate_limit_delay.is_zero() {
            sleep(self.config.rate_limit_delay).await;
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryData,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryData {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<Value>,
}

impl QuoteSummaryResponse {
    fn into_first_result(self, symbol: &str) -> Result<Map<String, Value>> {
        if let Some(error) = self.quote_summary.error
            && !error.is_null()
        {
            let description = error
                .get("description")
                .and_then(Value::as_str)
                .map_or_else(|| error.to_string(), str::to_string);
            return Err(DataError::YahooApi(description));
        }

        self.quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::missing(symbol, "no data found"))
    }
}

/// Merge quoteSummary modules into one flat profile.
///
/// `{raw, fmt}` wrappers are reduced to their raw number, empty objects are
/// dropped, and earlier modules win on key collisions.
fn flatten_modules(symbol: &str, result: &Map<String, Value>) -> InfoProfile {
    let mut profile = InfoProfile::new(symbol);

    for module in INFO_MODULES {
        let Some(fields) = result.get(*module).and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" {
                continue;
            }
            let value = match value {
                Value::Null => continue,
                Value::Object(obj) if obj.is_empty() => continue,
                Value::Object(obj) if obj.contains_key("raw") => match raw_number(value) {
                    Some(raw) => Value::from(raw),
                    None => continue,
                },
                other => other.clone(),
            };
            profile.fields.entry(key.clone()).or_insert(value);
        }
    }

    profile
}

fn parse_earnings_trend(symbol: &str, result: &Map<String, Value>) -> Result<RevenueEstimates> {
    let trend = result
        .get("earningsTrend")
        .and_then(|module| module.get("trend"))
        .and_then(Value::as_array)
        .ok_or_else(|| DataError::missing(symbol, "no earnings trend"))?;

    let mut estimates = RevenueEstimates::new(symbol);
    for entry in trend {
        let Some(period) = entry.get("period").and_then(Value::as_str) else {
            continue;
        };
        let growth = entry
            .get("revenueEstimate")
            .and_then(|estimate| estimate.get("growth"))
            .and_then(raw_number);
        estimates.growth.insert(period.to_string(), growth);
    }

    Ok(estimates)
}

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesData,
}

#[derive(Debug, Deserialize)]
struct TimeseriesData {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<Value>,
}

fn parse_timeseries(symbol: &str, response: TimeseriesResponse) -> Result<IncomeStatement> {
    if let Some(error) = response.timeseries.error
        && !error.is_null()
    {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let mut statement = IncomeStatement::new(symbol);
    for entry in response.timeseries.result.unwrap_or_default() {
        let Some(series_key) = entry
            .get("meta")
            .and_then(|meta| meta.get("type"))
            .and_then(Value::as_array)
            .and_then(|types| types.first())
            .and_then(Value::as_str)
        else {
            continue;
        };
        let Some((_, item)) = STATEMENT_SERIES.iter().find(|(key, _)| *key == series_key) else {
            continue;
        };
        let Some(points) = entry.get(series_key).and_then(Value::as_array) else {
            continue;
        };

        let values: Vec<PeriodValue> = points.iter().filter_map(parse_period_value).collect();
        if !values.is_empty() {
            statement.insert_series(*item, values);
        }
    }

    Ok(statement)
}

/// A dated point with no reported value still counts as a period, read as NaN.
fn parse_period_value(point: &Value) -> Option<PeriodValue> {
    let as_of = point.get("asOfDate").and_then(Value::as_str)?;
    let as_of = NaiveDate::parse_from_str(as_of, "%Y-%m-%d").ok()?;
    let value = point
        .get("reportedValue")
        .and_then(raw_number)
        .unwrap_or(f64::NAN);
    Some(PeriodValue { as_of, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_modules_precedence_and_wrappers() {
        let result = json!({
            "price": {
                "maxAge": 1,
                "longName": "Apple Inc.",
                "marketCap": {"raw": 3.0e12, "fmt": "3T"}
            },
            "summaryDetail": {
                "marketCap": {"raw": 1.0, "fmt": "1"},
                "trailingPE": {}
            },
            "financialData": {
                "currentPrice": {"raw": 190.0, "fmt": "190.00"},
                "revenueGrowth": {"raw": 0.06, "fmt": "6%"},
                "totalDebt": null
            }
        });
        let profile = flatten_modules("AAPL", result.as_object().unwrap());

        assert_eq!(profile.text("longName"), Some("Apple Inc."));
        assert_eq!(profile.number("marketCap"), 3.0e12);
        assert_eq!(profile.number("currentPrice"), 190.0);
        assert_eq!(profile.number("revenueGrowth"), 0.06);
        assert!(!profile.fields.contains_key("maxAge"));
        assert!(!profile.fields.contains_key("trailingPE"));
        assert!(!profile.fields.contains_key("totalDebt"));
    }

    #[test]
    fn test_flatten_modules_empty() {
        let result = json!({"price": {}, "financialData": {"maxAge": 86400}});
        assert!(flatten_modules("ZZZZ", result.as_object().unwrap()).is_empty());
    }

    #[test]
    fn test_quote_summary_error() {
        let response: QuoteSummaryResponse = serde_json::from_value(json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
            }
        }))
        .unwrap();

        let err = response.into_first_result("ZZZZ").unwrap_err();
        assert!(matches!(err, DataError::YahooApi(ref msg) if msg.contains("ZZZZ")));
    }

    #[test]
    fn test_parse_earnings_trend() {
        let result = json!({
            "earningsTrend": {
                "trend": [
                    {"period": "0q", "revenueEstimate": {"growth": {"raw": 0.02}}},
                    {"period": "0y", "revenueEstimate": {"growth": {"raw": 0.08, "fmt": "8%"}}},
                    {"period": "+1y", "revenueEstimate": {"growth": {}}}
                ]
            }
        });
        let estimates = parse_earnings_trend("MSFT", result.as_object().unwrap()).unwrap();

        assert_eq!(estimates.growth("0y").unwrap(), 0.08);
        assert!(estimates.growth("+1y").is_err());
        assert_eq!(estimates.growth.len(), 3);
    }

    #[test]
    fn test_parse_earnings_trend_missing_module() {
        let result = json!({"price": {}});
        assert!(parse_earnings_trend("MSFT", result.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_parse_timeseries() {
        let response: TimeseriesResponse = serde_json::from_value(json!({
            "timeseries": {
                "result": [
                    {
                        "meta": {"symbol": ["AAPL"], "type": ["annualGrossProfit"]},
                        "timestamp": [1, 2],
                        "annualGrossProfit": [
                            {"asOfDate": "2023-09-30", "reportedValue": {"raw": 169.1e9}},
                            null,
                            {"asOfDate": "2024-09-30", "reportedValue": {"raw": 180.7e9}}
                        ]
                    },
                    {
                        "meta": {"symbol": ["AAPL"], "type": ["annualEBITDA"]},
                        "timestamp": []
                    }
                ],
                "error": null
            }
        }))
        .unwrap();

        let statement = parse_timeseries("AAPL", response).unwrap();
        assert_eq!(
            statement.most_recent(line_items::GROSS_PROFIT).unwrap(),
            180.7e9
        );
        assert!(statement.most_recent(line_items::EBITDA).is_err());
    }

    #[test]
    fn test_parse_timeseries_null_latest_period() {
        let response: TimeseriesResponse = serde_json::from_value(json!({
            "timeseries": {
                "result": [{
                    "meta": {"symbol": ["SNOW"], "type": ["annualGrossProfit"]},
                    "annualGrossProfit": [
                        {"asOfDate": "2023-12-31", "reportedValue": {"raw": 100.0}},
                        {"asOfDate": "2024-12-31", "reportedValue": null}
                    ]
                }],
                "error": null
            }
        }))
        .unwrap();

        let statement = parse_timeseries("SNOW", response).unwrap();
        let series = &statement.line_items[line_items::GROSS_PROFIT];
        assert_eq!(series.len(), 2);
        // The newest period wins even without a value; no stale fallback.
        assert!(
            statement
                .most_recent(line_items::GROSS_PROFIT)
                .unwrap()
                .is_nan()
        );
    }

    #[test]
    fn test_validate_symbol() {
        assert!(validate_symbol("AAPL").is_ok());
        assert!(matches!(
            validate_symbol("  "),
            Err(DataError::InvalidSymbol(_))
        ));
    }
}
