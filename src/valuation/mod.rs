//! Valuation engine: DCF formula, implied growth solver, sensitivity and projections
//!
//! Everything in here is pure and synchronous. No logging, no I/O, no shared state;
//! diagnostics belong to the caller.

mod inputs;
mod formula;
mod solver;
mod sensitivity;
mod projection;
mod results;
mod engine;

pub use inputs::{ValuationInputs, ImpliedValuationInputs, CustomGrowthInputs};
pub use formula::intrinsic_value;
pub use solver::{SolverConfig, SolverConfigError, solve_implied_growth, solve_implied_growth_with};
pub use sensitivity::sensitivity_analysis;
pub use projection::project_prices;
pub use results::{
    SolverResult, SensitivityPoint, ProjectionPoint, ImpliedValuation, CustomGrowthValuation,
    percentage_difference,
};
pub use engine::{
    compute_implied_valuation, compute_implied_valuation_with, compute_custom_growth_valuation,
};

// ============================================================================
// Analysis Constants
// ============================================================================
// - Sensitivity shifts are additive, in percentage points of growth
// - Projections re-value the company after 1, 2 and 3 periods of FCF growth

/// Growth rate shifts applied around the implied rate, in percentage points
pub const SENSITIVITY_OFFSETS_PCT: [f64; 2] = [-5.0, 5.0];

/// Number of forward periods in a custom growth projection
pub const PROJECTION_PERIODS: usize = 3;

// ============================================================================
// Default Assumptions
// ============================================================================

/// Explicit projection horizon used when a request leaves it out (years)
pub const DEFAULT_PROJECTION_YEARS: u32 = 5;

/// Default discount rate, in percent (8%)
pub const DEFAULT_WACC_PCT: f64 = 8.0;

/// Default perpetual growth rate after the horizon, in percent (2%)
pub const DEFAULT_TERMINAL_GROWTH_PCT: f64 = 2.0;
