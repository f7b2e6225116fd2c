//! Implied growth rate solver
//!
//! Inverts the DCF formula for the growth rate by bisection. Intrinsic value is
//! strictly increasing in growth over [0, 1), so the bracket always shrinks
//! towards the unique root. Targets outside the bracket saturate at the nearest
//! bound instead of failing.

use super::inputs::ValuationInputs;
use super::results::SolverResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard stop for degenerate tolerances; the default bracket needs 27 halvings
const MAX_BISECTIONS: u32 = 200;

/// Search bracket and convergence tolerance for the bisection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Lowest growth rate searched (decimal)
    #[serde(default = "default_lower_bound")]
    pub lower_bound: f64,

    /// Highest growth rate searched (decimal)
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,

    /// Stop once the bracket is no wider than this
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_lower_bound() -> f64 { 0.0 }
fn default_upper_bound() -> f64 { 1.0 }
fn default_tolerance() -> f64 { 1e-8 }

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower_bound: 0.0,
            upper_bound: 1.0,
            tolerance: 1e-8,
        }
    }
}

/// Why a `SolverConfig` cannot drive the bisection
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SolverConfigError {
    #[error("Solver bounds must be finite (got [{lower}, {upper}])")]
    NonFiniteBounds { lower: f64, upper: f64 },

    #[error("Solver lower bound {lower} must be below upper bound {upper}")]
    EmptyBracket { lower: f64, upper: f64 },

    #[error("Solver tolerance must be finite and non-negative (got {0})")]
    InvalidTolerance(f64),
}

impl SolverConfig {
    /// Check the bracket is a finite, non-empty interval and the tolerance is
    /// usable. Zero tolerance is allowed; `MAX_BISECTIONS` bounds the loop.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        let (lower, upper) = (self.lower_bound, self.upper_bound);
        if !lower.is_finite() || !upper.is_finite() {
            return Err(SolverConfigError::NonFiniteBounds { lower, upper });
        }
        if lower >= upper {
            return Err(SolverConfigError::EmptyBracket { lower, upper });
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SolverConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Find the growth rate at which `base` is worth `enterprise_value`,
/// searching [0, 1] to a 1e-8 bracket.
pub fn solve_implied_growth(enterprise_value: f64, base: &ValuationInputs) -> SolverResult {
    solve_implied_growth_with(enterprise_value, base, &SolverConfig::default())
}

/// Bisection with an explicit bracket and tolerance.
///
/// The returned rate is the last midpoint evaluated, not the centre of the
/// final bracket. `base.growth_rate` is ignored.
pub fn solve_implied_growth_with(
    enterprise_value: f64,
    base: &ValuationInputs,
    config: &SolverConfig,
) -> SolverResult {
    let mut lower = config.lower_bound;
    let mut upper = config.upper_bound;
    let mut growth_rate = (lower + upper) / 2.0;
    let mut iterations = 0;

    while (upper - lower) > config.tolerance && iterations < MAX_BISECTIONS {
        growth_rate = (lower + upper) / 2.0;
        iterations += 1;

        if base.with_growth_rate(growth_rate).intrinsic_value() > enterprise_value {
            upper = growth_rate;
        } else {
            lower = growth_rate;
        }
    }

    let saturated = growth_rate - config.lower_bound <= config.tolerance
        || config.upper_bound - growth_rate <= config.tolerance;

    SolverResult {
        implied_growth_rate: growth_rate,
        achieved_intrinsic_value: base.with_growth_rate(growth_rate).intrinsic_value(),
        iterations,
        saturated,
    }
}
