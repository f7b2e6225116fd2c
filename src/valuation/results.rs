//! Result records produced by the valuation engine

use super::PROJECTION_PERIODS;
use serde::{Deserialize, Serialize};

/// Outcome of the implied growth bisection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Growth rate (decimal) whose intrinsic value matches the target
    pub implied_growth_rate: f64,

    /// Intrinsic value at `implied_growth_rate`
    pub achieved_intrinsic_value: f64,

    /// Number of bisection steps taken
    pub iterations: u32,

    /// True when the rate converged onto a bracket bound, i.e. the target
    /// was not reachable inside the search range
    pub saturated: bool,
}

/// Stock price with the growth rate shifted by a fixed number of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Applied shift, in percentage points (-5 or +5)
    pub growth_rate_offset_pct: f64,

    /// Shifted growth rate, in percent
    pub implied_growth_rate_pct: f64,

    /// Intrinsic value at the shifted rate per share
    pub implied_stock_price: f64,
}

/// Stock price after `period` years of FCF growth at the custom rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based period index
    pub period: u32,

    pub projected_fcf: f64,
    pub projected_stock_price: f64,
}

/// Output of `compute_implied_valuation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpliedValuation {
    pub solver: SolverResult,
    pub intrinsic_value: f64,
    pub implied_stock_price: f64,
    pub sensitivity: [SensitivityPoint; 2],
}

impl ImpliedValuation {
    /// Implied growth rate as a decimal
    pub fn implied_growth_rate(&self) -> f64 {
        self.solver.implied_growth_rate
    }

    /// False when any value or price overflowed to inf/NaN
    pub fn is_finite(&self) -> bool {
        self.intrinsic_value.is_finite()
            && self.implied_stock_price.is_finite()
            && self.sensitivity.iter().all(|p| p.implied_stock_price.is_finite())
    }
}

/// Output of `compute_custom_growth_valuation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGrowthValuation {
    /// Per-share value at the custom rate with today's FCF
    pub implied_stock_price: f64,
    pub projections: [ProjectionPoint; PROJECTION_PERIODS],
}

impl CustomGrowthValuation {
    /// False when the price or any projected price overflowed to inf/NaN
    pub fn is_finite(&self) -> bool {
        self.implied_stock_price.is_finite()
            && self.projections.iter().all(|p| p.projected_stock_price.is_finite())
    }
}

/// Percentage gap between a modelled price and the market price.
///
/// Returns `None` when there is no usable market price to compare against.
pub fn percentage_difference(price: f64, current_price: Option<f64>) -> Option<f64> {
    match current_price {
        Some(current) if current > 0.0 && current.is_finite() => {
            Some((price - current) / current * 100.0)
        }
        _ => None,
    }
}
