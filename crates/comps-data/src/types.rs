//! Payloads returned by a [`FundamentalsSource`](crate::FundamentalsSource).

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Relative-year labels used by analyst revenue estimates.
pub mod periods {
    /// Current fiscal year.
    pub const CURRENT_YEAR: &str = "0y";
    /// Next fiscal year.
    pub const NEXT_YEAR: &str = "+1y";
}

/// Income statement line item names.
pub mod line_items {
    /// Total revenue.
    pub const TOTAL_REVENUE: &str = "Total Revenue";
    /// Gross profit.
    pub const GROSS_PROFIT: &str = "Gross Profit";
    /// Earnings before interest, taxes, depreciation and amortization.
    pub const EBITDA: &str = "EBITDA";
}

/// Profile keys read by the valuation pipeline.
pub mod fields {
    /// Company long name
    pub const LONG_NAME: &str = "longName";
    /// Current share price
    pub const CURRENT_PRICE: &str = "currentPrice";
    /// Market capitalization
    pub const MARKET_CAP: &str = "marketCap";
    /// Enterprise value
    pub const ENTERPRISE_VALUE: &str = "enterpriseValue";
    /// Total debt
    pub const TOTAL_DEBT: &str = "totalDebt";
    /// Trailing twelve month revenue
    pub const TOTAL_REVENUE: &str = "totalRevenue";
    /// Trailing twelve month revenue growth
    pub const REVENUE_GROWTH: &str = "revenueGrowth";
    /// Gross margin
    pub const GROSS_MARGINS: &str = "grossMargins";
    /// EBITDA
    pub const EBITDA: &str = "ebitda";
    /// EBITDA margin
    pub const EBITDA_MARGINS: &str = "ebitdaMargins";
}

/// Flat key/value company profile.
///
/// Keys follow the provider's camel-case field names (`longName`,
/// `currentPrice`, `enterpriseValue`, ...). Lookups never fail: a missing
/// numeric field reads as NaN and a missing text field as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoProfile {
    /// Stock symbol
    pub symbol: String,
    /// Raw profile fields
    pub fields: Map<String, Value>,
}

impl InfoProfile {
    /// Create an empty profile for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Whether the provider returned no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Numeric field, or NaN when absent, null or not a number.
    ///
    /// Both bare numbers and Yahoo's `{"raw": .., "fmt": ..}` wrappers are
    /// accepted.
    pub fn number(&self, key: &str) -> f64 {
        self.fields.get(key).and_then(raw_number).unwrap_or(f64::NAN)
    }

    /// Text field, if present.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Extract an f64 from a bare number or a `{raw}` wrapper.
pub(crate) fn raw_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(obj) => obj.get("raw").and_then(Value::as_f64),
        _ => None,
    }
}

/// Analyst revenue growth estimates keyed by relative period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueEstimates {
    /// Stock symbol
    pub symbol: String,
    /// Growth fraction per period label (`"0y"`, `"+1y"`, ...)
    pub growth: BTreeMap<String, Option<f64>>,
}

impl RevenueEstimates {
    /// Create an empty estimate table for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            growth: BTreeMap::new(),
        }
    }

    /// Builder-style period insertion.
    pub fn with_period(mut self, period: impl Into<String>, growth: Option<f64>) -> Self {
        self.growth.insert(period.into(), growth);
        self
    }

    /// Growth estimate for `period`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingData`] when the period is absent or carries
    /// no growth value.
    pub fn growth(&self, period: &str) -> Result<f64> {
        match self.growth.get(period) {
            Some(Some(value)) => Ok(*value),
            Some(None) => Err(DataError::missing(
                &self.symbol,
                format!("no revenue growth estimate for period {period}"),
            )),
            None => Err(DataError::missing(
                &self.symbol,
                format!("period {period} not in revenue estimates"),
            )),
        }
    }
}

/// A reported value for one fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodValue {
    /// Period end date
    pub as_of: NaiveDate,
    /// Reported value
    pub value: f64,
}

/// Annual income statement, one series per line item, newest period first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Stock symbol
    pub symbol: String,
    /// Line item name to dated values
    pub line_items: BTreeMap<String, Vec<PeriodValue>>,
}

impl IncomeStatement {
    /// Create an empty statement for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            line_items: BTreeMap::new(),
        }
    }

    /// Insert a line item series. Values are re-ordered newest first.
    pub fn insert_series(&mut self, item: impl Into<String>, mut values: Vec<PeriodValue>) {
        values.sort_by(|a, b| b.as_of.cmp(&a.as_of));
        self.line_items.insert(item.into(), values);
    }

    /// Builder-style variant of [`insert_series`](Self::insert_series).
    pub fn with_series(mut self, item: impl Into<String>, values: Vec<PeriodValue>) -> Self {
        self.insert_series(item, values);
        self
    }

    /// Value of the most recent period for `item`, NaN if that period
    /// reported nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingData`] when the line item is absent or has
    /// no reported periods.
    pub fn most_recent(&self, item: &str) -> Result<f64> {
        self.line_items
            .get(item)
            .and_then(|series| series.first())
            .map(|period| period.value)
            .ok_or_else(|| DataError::missing(&self.symbol, format!("no {item} in financials")))
    }
}
