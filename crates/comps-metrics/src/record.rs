//! One output row per ticker.

use crate::registry::COLUMN_COUNT;
use crate::valuation::ValuationRatios;
use serde::{Deserialize, Serialize};

/// Company name used when the provider has none.
pub const UNKNOWN_COMPANY: &str = "N/A";

/// A single typed cell of an output row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Text value
    Text(&'a str),
    /// Finite or infinite number
    Number(f64),
    /// Missing value (NaN)
    Empty,
}

impl Cell<'_> {
    /// Number cell, or [`Cell::Empty`] for NaN.
    pub const fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::Empty
        } else {
            Self::Number(value)
        }
    }

    /// Plain-text rendering: numbers via `Display`, missing as an empty string.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => (*s).to_string(),
            Self::Number(n) => n.to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// Valuation snapshot for one ticker.
///
/// Every numeric field is NaN when the provider had no value for it. Field
/// order matches [`COLUMNS`](crate::registry::COLUMNS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Trimmed ticker symbol
    #[serde(rename = "Ticker")]
    pub ticker: String,
    /// Company long name
    #[serde(rename = "Company")]
    pub company: String,
    /// Current share price
    #[serde(rename = "Price")]
    pub price: f64,
    /// Market capitalization
    #[serde(rename = "Market Cap")]
    pub market_cap: f64,
    /// Enterprise value
    #[serde(rename = "EV")]
    pub enterprise_value: f64,
    /// Total debt
    #[serde(rename = "Debt")]
    pub debt: f64,
    /// Trailing twelve month revenue
    #[serde(rename = "TTM Rev")]
    pub ttm_revenue: f64,
    /// Trailing twelve month revenue growth
    #[serde(rename = "TTM Rev Gr")]
    pub ttm_revenue_growth: f64,
    /// Analyst revenue growth estimate, current year
    #[serde(rename = "Tgt Rev Gr CY")]
    pub revenue_growth_current_year: f64,
    /// Analyst revenue growth estimate, next year
    #[serde(rename = "Tgt Rev Gr NY")]
    pub revenue_growth_next_year: f64,
    /// Most recent annual gross profit
    #[serde(rename = "Gross Profit")]
    pub gross_profit: f64,
    /// Gross margin
    #[serde(rename = "Gross Mgn")]
    pub gross_margin: f64,
    /// EBITDA
    #[serde(rename = "EBITDA")]
    pub ebitda: f64,
    /// EBITDA margin
    #[serde(rename = "EBITDA Mgn")]
    pub ebitda_margin: f64,
    /// Derived ratios
    #[serde(flatten)]
    pub ratios: RatioColumns,
}

/// Ratio columns of a [`CompanyRecord`], serialized under their header names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioColumns {
    /// EV / TTM revenue
    #[serde(rename = "EV/TTM Rev")]
    pub ev_to_ttm_revenue: f64,
    /// EV / forward revenue
    #[serde(rename = "EV/Fwd Rev")]
    pub ev_to_forward_revenue: f64,
    /// EV / gross profit
    #[serde(rename = "EV/GP")]
    pub ev_to_gross_profit: f64,
    /// EV / gross profit / expected growth
    #[serde(rename = "EV/GP/Exp Gr")]
    pub ev_to_gross_profit_to_growth: f64,
    /// Rule of 40
    #[serde(rename = "Rule of 40")]
    pub rule_of_40: f64,
}

impl From<ValuationRatios> for RatioColumns {
    fn from(r: ValuationRatios) -> Self {
        Self {
            ev_to_ttm_revenue: r.ev_to_ttm_revenue,
            ev_to_forward_revenue: r.ev_to_forward_revenue,
            ev_to_gross_profit: r.ev_to_gross_profit,
            ev_to_gross_profit_to_growth: r.ev_to_gross_profit_to_growth,
            rule_of_40: r.rule_of_40,
        }
    }
}

impl CompanyRecord {
    /// A record with every numeric field missing.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company: UNKNOWN_COMPANY.to_string(),
            price: f64::NAN,
            market_cap: f64::NAN,
            enterprise_value: f64::NAN,
            debt: f64::NAN,
            ttm_revenue: f64::NAN,
            ttm_revenue_growth: f64::NAN,
            revenue_growth_current_year: f64::NAN,
            revenue_growth_next_year: f64::NAN,
            gross_profit: f64::NAN,
            gross_margin: f64::NAN,
            ebitda: f64::NAN,
            ebitda_margin: f64::NAN,
            ratios: RatioColumns {
                ev_to_ttm_revenue: f64::NAN,
                ev_to_forward_revenue: f64::NAN,
                ev_to_gross_profit: f64::NAN,
                ev_to_gross_profit_to_growth: f64::NAN,
                rule_of_40: f64::NAN,
            },
        }
    }

    /// The row as typed cells, in column order.
    pub fn cells(&self) -> [Cell<'_>; COLUMN_COUNT] {
        [
            Cell::Text(&self.ticker),
            Cell::Text(&self.company),
            Cell::number(self.price),
            Cell::number(self.market_cap),
            Cell::number(self.enterprise_value),
            Cell::number(self.debt),
            Cell::number(self.ttm_revenue),
            Cell::number(self.ttm_revenue_growth),
            Cell::number(self.revenue_growth_current_year),
            Cell::number(self.revenue_growth_next_year),
            Cell::number(self.gross_profit),
            Cell::number(self.gross_margin),
            Cell::number(self.ebitda),
            Cell::number(self.ebitda_margin),
            Cell::number(self.ratios.ev_to_ttm_revenue),
            Cell::number(self.ratios.ev_to_forward_revenue),
            Cell::number(self.ratios.ev_to_gross_profit),
            Cell::number(self.ratios.ev_to_gross_profit_to_growth),
            Cell::number(self.ratios.rule_of_40),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::COLUMNS;

    #[test]
    fn test_empty_record() {
        let record = CompanyRecord::empty("AAPL");
        let cells = record.cells();

        assert_eq!(cells[0], Cell::Text("AAPL"));
        assert_eq!(cells[1], Cell::Text(UNKNOWN_COMPANY));
        assert!(cells[2..].iter().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn test_cells_follow_column_order() {
        let mut record = CompanyRecord::empty("MSFT");
        record.enterprise_value = 200.0;
        record.ratios.rule_of_40 = 0.4;

        let cells = record.cells();
        let ev = COLUMNS.iter().position(|c| c.name == "EV").unwrap();
        let rule = COLUMNS.iter().position(|c| c.name == "Rule of 40").unwrap();
        assert_eq!(cells[ev], Cell::Number(200.0));
        assert_eq!(cells[rule], Cell::Number(0.4));
    }

    #[test]
    fn test_cell_render() {
        assert_eq!(Cell::Text("N/A").render(), "N/A");
        assert_eq!(Cell::number(2.5).render(), "2.5");
        assert_eq!(Cell::number(f64::NAN).render(), "");
    }

    #[test]
    fn test_json_keys_match_headers() {
        let record = CompanyRecord::empty("AAPL");
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), COLUMNS.len());
        for column in &COLUMNS {
            assert!(object.contains_key(column.name), "missing {}", column.name);
        }
        assert!(object["EV"].is_null());
    }
}
