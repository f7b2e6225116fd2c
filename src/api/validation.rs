//! Precondition checks between the wire records and the valuation engine
//!
//! The engine never fails; it returns inf/NaN on bad input. `Validate` rules
//! out the degenerate inputs (zero spread, non-positive amounts, out-of-range
//! rates and horizons). Valid inputs can still overflow at extreme magnitudes,
//! which the handler reports as `ApiError::NonFiniteResult`.

use super::error::ValidationError;
use super::request::{CalculateRequest, CustomGrowthRequest};
use crate::valuation::{CustomGrowthInputs, ImpliedValuationInputs};

/// Longest explicit horizon accepted, in years
pub const MAX_PROJECTION_YEARS: u32 = 1000;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check a request and convert it into engine inputs
pub trait Validate {
    type Output;

    fn validate(&self) -> ValidationResult<Self::Output>;
}

impl Validate for CalculateRequest {
    type Output = ImpliedValuationInputs;

    fn validate(&self) -> ValidationResult<ImpliedValuationInputs> {
        require_finite("enterprise_value", self.enterprise_value)?;
        require_finite("free_cash_flow", self.free_cash_flow)?;
        require_finite("wacc", self.wacc)?;
        require_finite("terminal_growth_rate", self.terminal_growth_rate)?;
        require_finite("shares_outstanding", self.shares_outstanding)?;

        require_discount_spread(self.wacc, self.terminal_growth_rate)?;
        require_positive("free_cash_flow", self.free_cash_flow)?;
        require_positive("enterprise_value", self.enterprise_value)?;
        require_positive("shares_outstanding", self.shares_outstanding)?;
        let horizon_years = require_horizon(self.projection_years)?;

        Ok(ImpliedValuationInputs {
            enterprise_value: self.enterprise_value,
            free_cash_flow: self.free_cash_flow,
            wacc: self.wacc,
            terminal_growth_rate: self.terminal_growth_rate,
            horizon_years,
            shares_outstanding: self.shares_outstanding,
        })
    }
}

impl Validate for CustomGrowthRequest {
    type Output = CustomGrowthInputs;

    /// Also scales the three percentage fields to decimals
    fn validate(&self) -> ValidationResult<CustomGrowthInputs> {
        require_finite("free_cash_flow", self.free_cash_flow)?;
        require_finite("wacc", self.wacc)?;
        require_finite("terminal_growth_rate", self.terminal_growth_rate)?;
        require_finite("shares_outstanding", self.shares_outstanding)?;
        require_finite("custom_growth_rate", self.custom_growth_rate)?;

        let wacc = self.wacc / 100.0;
        let terminal_growth_rate = self.terminal_growth_rate / 100.0;
        let custom_growth_rate = self.custom_growth_rate / 100.0;

        if custom_growth_rate <= -1.0 || custom_growth_rate >= 1.0 {
            return Err(ValidationError::CustomGrowthOutOfRange {
                value_pct: self.custom_growth_rate,
            });
        }
        require_discount_spread(wacc, terminal_growth_rate)?;
        require_positive("free_cash_flow", self.free_cash_flow)?;
        require_positive("shares_outstanding", self.shares_outstanding)?;
        let horizon_years = require_horizon(self.projection_years)?;

        Ok(CustomGrowthInputs {
            free_cash_flow: self.free_cash_flow,
            wacc,
            terminal_growth_rate,
            horizon_years,
            shares_outstanding: self.shares_outstanding,
            custom_growth_rate,
        })
    }
}

fn require_finite(field: &'static str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> ValidationResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}

/// WACC positive and strictly above terminal growth
fn require_discount_spread(wacc: f64, terminal_growth_rate: f64) -> ValidationResult<()> {
    if wacc <= 0.0 {
        return Err(ValidationError::NonPositiveWacc { wacc });
    }
    if terminal_growth_rate >= wacc {
        return Err(ValidationError::WaccNotAboveTerminalGrowth { wacc, terminal_growth_rate });
    }
    Ok(())
}

fn require_horizon(years: i64) -> ValidationResult<u32> {
    match u32::try_from(years) {
        Ok(n) if (1..=MAX_PROJECTION_YEARS).contains(&n) => Ok(n),
        _ => Err(ValidationError::HorizonOutOfRange { years, max: MAX_PROJECTION_YEARS }),
    }
}
