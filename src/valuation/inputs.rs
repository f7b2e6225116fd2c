//! Input records for the valuation engine
//!
//! These are plain value types. Preconditions (positive FCF, WACC above terminal
//! growth, ...) are checked by `api::validation` before any of them reach the engine.

use super::formula;
use serde::{Deserialize, Serialize};

/// Parameters of a single DCF evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Base free cash flow, projected forward from period 1
    pub free_cash_flow: f64,

    /// Discount rate (WACC) as a decimal
    pub discount_rate: f64,

    /// Growth rate over the explicit horizon as a decimal
    pub growth_rate: f64,

    /// Perpetual growth rate after the horizon as a decimal
    pub terminal_growth_rate: f64,

    /// Number of explicitly discounted years
    pub horizon_years: u32,
}

impl ValuationInputs {
    pub fn new(
        free_cash_flow: f64,
        discount_rate: f64,
        growth_rate: f64,
        terminal_growth_rate: f64,
        horizon_years: u32,
    ) -> Self {
        Self {
            free_cash_flow,
            discount_rate,
            growth_rate,
            terminal_growth_rate,
            horizon_years,
        }
    }

    /// Same assumptions, different growth rate over the horizon
    pub fn with_growth_rate(self, growth_rate: f64) -> Self {
        Self { growth_rate, ..self }
    }

    /// Same assumptions, different base free cash flow
    pub fn with_free_cash_flow(self, free_cash_flow: f64) -> Self {
        Self { free_cash_flow, ..self }
    }

    /// Intrinsic value of these inputs
    pub fn intrinsic_value(&self) -> f64 {
        formula::intrinsic_value(
            self.free_cash_flow,
            self.discount_rate,
            self.growth_rate,
            self.terminal_growth_rate,
            self.horizon_years,
        )
    }
}

/// Inputs for recovering the growth rate implied by an enterprise value.
/// All rates are decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedValuationInputs {
    pub enterprise_value: f64,
    pub free_cash_flow: f64,
    pub wacc: f64,
    pub terminal_growth_rate: f64,
    pub horizon_years: u32,
    pub shares_outstanding: f64,
}

impl ImpliedValuationInputs {
    /// DCF parameters with the growth rate left at zero, ready for the solver
    pub fn base(&self) -> ValuationInputs {
        ValuationInputs::new(
            self.free_cash_flow,
            self.wacc,
            0.0,
            self.terminal_growth_rate,
            self.horizon_years,
        )
    }
}

/// Inputs for pricing the stock under a user-chosen growth rate.
/// All rates are decimals; percentage inputs are scaled before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomGrowthInputs {
    pub free_cash_flow: f64,
    pub wacc: f64,
    pub terminal_growth_rate: f64,
    pub horizon_years: u32,
    pub shares_outstanding: f64,
    pub custom_growth_rate: f64,
}

impl CustomGrowthInputs {
    /// DCF parameters at the custom growth rate
    pub fn valuation_inputs(&self) -> ValuationInputs {
        ValuationInputs::new(
            self.free_cash_flow,
            self.wacc,
            self.custom_growth_rate,
            self.terminal_growth_rate,
            self.horizon_years,
        )
    }
}
