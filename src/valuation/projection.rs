//! Forward stock price path under a custom growth rate
//!
//! Each period compounds today's FCF forward and re-runs the full DCF with the
//! same assumptions. This answers "what is the stock worth once FCF has grown
//! for p years", not a discounted multi-year price forecast.

use super::inputs::ValuationInputs;
use super::results::ProjectionPoint;
use super::PROJECTION_PERIODS;

/// Project the stock price for periods 1..=PROJECTION_PERIODS.
///
/// `inputs.growth_rate` is the custom rate, used both to compound FCF forward
/// and as the horizon growth rate of each re-valuation.
pub fn project_prices(
    inputs: &ValuationInputs,
    shares_outstanding: f64,
) -> [ProjectionPoint; PROJECTION_PERIODS] {
    let growth = 1.0 + inputs.growth_rate;

    std::array::from_fn(|i| {
        let period = i as u32 + 1;
        let projected_fcf = inputs.free_cash_flow * growth.powi(period as i32);
        let value = inputs.with_free_cash_flow(projected_fcf).intrinsic_value();

        ProjectionPoint {
            period,
            projected_fcf,
            projected_stock_price: value / shares_outstanding,
        }
    })
}
