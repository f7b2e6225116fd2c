//! Reverse DCF - market-implied growth rates and fair stock prices
//!
//! This library provides:
//! - A discounted-cash-flow valuation formula with a perpetuity-growth terminal value
//! - Bisection inversion of that formula to recover the growth rate implied by an enterprise value
//! - Sensitivity analysis around the implied rate
//! - Three-period stock price projections under a custom growth assumption
//! - A transport-agnostic JSON request layer with typed input validation

pub mod valuation;
pub mod api;
pub mod config;

// Re-export commonly used types
pub use valuation::{
    ValuationInputs, ImpliedValuationInputs, CustomGrowthInputs,
    ImpliedValuation, CustomGrowthValuation, SolverConfig, SolverResult,
    compute_implied_valuation, compute_custom_growth_valuation, intrinsic_value,
};
pub use api::{handle_request, ApiResponse, ApiError, ValidationError};
pub use config::ServiceConfig;
