//! Entry points composing formula, solver, sensitivity and projection
//!
//! Both functions assume validated inputs (see `api::validation`). Given
//! anything else they still return, possibly with infinite or NaN fields.

use super::inputs::{CustomGrowthInputs, ImpliedValuationInputs};
use super::projection::project_prices;
use super::results::{CustomGrowthValuation, ImpliedValuation};
use super::sensitivity::sensitivity_analysis;
use super::solver::{solve_implied_growth_with, SolverConfig};

/// Growth rate implied by the enterprise value, the matching per-share price,
/// and the price at the implied rate +/- 5 points.
pub fn compute_implied_valuation(inputs: &ImpliedValuationInputs) -> ImpliedValuation {
    compute_implied_valuation_with(inputs, &SolverConfig::default())
}

/// As `compute_implied_valuation`, with an explicit solver bracket/tolerance
pub fn compute_implied_valuation_with(
    inputs: &ImpliedValuationInputs,
    config: &SolverConfig,
) -> ImpliedValuation {
    let base = inputs.base();
    let solver = solve_implied_growth_with(inputs.enterprise_value, &base, config);

    let intrinsic_value = solver.achieved_intrinsic_value;
    let sensitivity = sensitivity_analysis(
        solver.implied_growth_rate,
        &base,
        inputs.shares_outstanding,
    );

    ImpliedValuation {
        solver,
        intrinsic_value,
        implied_stock_price: intrinsic_value / inputs.shares_outstanding,
        sensitivity,
    }
}

/// Per-share value at a custom growth rate, plus the three-period projection
pub fn compute_custom_growth_valuation(inputs: &CustomGrowthInputs) -> CustomGrowthValuation {
    let dcf = inputs.valuation_inputs();

    CustomGrowthValuation {
        implied_stock_price: dcf.intrinsic_value() / inputs.shares_outstanding,
        projections: project_prices(&dcf, inputs.shares_outstanding),
    }
}
