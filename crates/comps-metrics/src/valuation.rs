//! Valuation Ratios
//!
//! Enterprise-value multiples and the Rule of 40, derived from provider
//! fundamentals. Every guard goes through [`is_usable`], so a NaN or zero
//! input short-circuits to NaN instead of dividing.

use serde::{Deserialize, Serialize};

/// Whether `x` can be used as a divisor or summand: neither NaN nor zero.
#[inline]
pub const fn is_usable(x: f64) -> bool {
    !x.is_nan() && x != 0.0
}

/// `numerator / denominator`, or NaN when the denominator is not usable.
#[inline]
pub const fn ratio(numerator: f64, denominator: f64) -> f64 {
    if is_usable(denominator) {
        numerator / denominator
    } else {
        f64::NAN
    }
}

/// Fundamentals feeding the ratio derivation. NaN marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Enterprise value
    pub enterprise_value: f64,
    /// Trailing twelve month revenue
    pub ttm_revenue: f64,
    /// Trailing twelve month revenue growth (fraction)
    pub ttm_revenue_growth: f64,
    /// Analyst revenue growth estimate for the current fiscal year (fraction)
    pub growth_estimate_current_year: f64,
    /// Most recent annual gross profit
    pub gross_profit: f64,
    /// EBITDA margin (fraction)
    pub ebitda_margin: f64,
}

impl Default for ValuationInputs {
    fn default() -> Self {
        Self {
            enterprise_value: f64::NAN,
            ttm_revenue: f64::NAN,
            ttm_revenue_growth: f64::NAN,
            growth_estimate_current_year: f64::NAN,
            gross_profit: f64::NAN,
            ebitda_margin: f64::NAN,
        }
    }
}

/// The five derived ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationRatios {
    /// EV / TTM revenue
    pub ev_to_ttm_revenue: f64,
    /// EV / (TTM revenue x (1 + current-year growth estimate))
    pub ev_to_forward_revenue: f64,
    /// EV / gross profit
    pub ev_to_gross_profit: f64,
    /// (EV / gross profit) / current-year growth estimate
    pub ev_to_gross_profit_to_growth: f64,
    /// TTM revenue growth + EBITDA margin
    pub rule_of_40: f64,
}

impl ValuationRatios {
    /// Derive all ratios from `inputs`.
    ///
    /// The forward-looking ratios use the current-year growth estimate only
    /// and are NaN whenever that estimate is unusable. Rule of 40 requires
    /// both of its inputs to be usable and is a plain sum (no scaling).
    pub const fn derive(inputs: &ValuationInputs) -> Self {
        let growth = inputs.growth_estimate_current_year;
        let ev_to_gross_profit = ratio(inputs.enterprise_value, inputs.gross_profit);

        let ev_to_forward_revenue = if is_usable(growth) {
            ratio(inputs.enterprise_value, inputs.ttm_revenue * (1.0 + growth))
        } else {
            f64::NAN
        };

        let rule_of_40 =
            if is_usable(inputs.ttm_revenue_growth) && is_usable(inputs.ebitda_margin) {
                inputs.ttm_revenue_growth + inputs.ebitda_margin
            } else {
                f64::NAN
            };

        Self {
            ev_to_ttm_revenue: ratio(inputs.enterprise_value, inputs.ttm_revenue),
            ev_to_forward_revenue,
            ev_to_gross_profit,
            ev_to_gross_profit_to_growth: ratio(ev_to_gross_profit, growth),
            rule_of_40,
        }
    }
}
