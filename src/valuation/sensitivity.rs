//! Sensitivity of the stock price to the implied growth rate

use super::inputs::ValuationInputs;
use super::results::SensitivityPoint;
use super::SENSITIVITY_OFFSETS_PCT;

/// Re-price the stock with the growth rate shifted by each of
/// `SENSITIVITY_OFFSETS_PCT` (additive, so 10% becomes 5% and 15%).
///
/// Points come back in offset order: -5 first, then +5.
pub fn sensitivity_analysis(
    implied_growth_rate: f64,
    base: &ValuationInputs,
    shares_outstanding: f64,
) -> [SensitivityPoint; 2] {
    SENSITIVITY_OFFSETS_PCT.map(|offset_pct| {
        let growth_rate = implied_growth_rate + offset_pct / 100.0;
        let value = base.with_growth_rate(growth_rate).intrinsic_value();

        SensitivityPoint {
            growth_rate_offset_pct: offset_pct,
            implied_growth_rate_pct: growth_rate * 100.0,
            implied_stock_price: value / shares_outstanding,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_offsets_are_additive_points() {
        let base = ValuationInputs::new(100.0, 0.08, 0.0, 0.02, 10);
        let points = sensitivity_analysis(0.10, &base, 50.0);

        assert_eq!(points[0].growth_rate_offset_pct, -5.0);
        assert_eq!(points[1].growth_rate_offset_pct, 5.0);
        assert_abs_diff_eq!(points[0].implied_growth_rate_pct, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[1].implied_growth_rate_pct, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_prices_are_per_share_values() {
        let base = ValuationInputs::new(100.0, 0.08, 0.0, 0.02, 10);
        let points = sensitivity_analysis(0.07, &base, 50.0);

        let low = base.with_growth_rate(0.07 - 0.05).intrinsic_value() / 50.0;
        let high = base.with_growth_rate(0.07 + 0.05).intrinsic_value() / 50.0;
        assert_relative_eq!(points[0].implied_stock_price, low, max_relative = 1e-12);
        assert_relative_eq!(points[1].implied_stock_price, high, max_relative = 1e-12);
        assert!(points[0].implied_stock_price < points[1].implied_stock_price);
    }

    #[test]
    fn test_negative_shift_below_zero_still_prices() {
        let base = ValuationInputs::new(100.0, 0.08, 0.0, 0.02, 10);
        let points = sensitivity_analysis(0.01, &base, 10.0);

        assert_abs_diff_eq!(points[0].implied_growth_rate_pct, -4.0, epsilon = 1e-9);
        assert!(points[0].implied_stock_price.is_finite());
        assert!(points[0].implied_stock_price > 0.0);
    }
}
