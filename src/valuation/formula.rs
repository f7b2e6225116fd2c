//! Discounted-cash-flow intrinsic value
//!
//! Two-stage model: FCF grows at `growth_rate` for `horizon_years` explicitly
//! discounted years, then at `terminal_growth_rate` forever (Gordon growth).

/// Intrinsic value = PV of horizon cash flows + PV of the terminal value.
///
/// # Arguments
/// * `fcf` - Base free cash flow (year 0)
/// * `wacc` - Discount rate as a decimal
/// * `growth_rate` - Growth over the explicit horizon as a decimal
/// * `terminal_growth_rate` - Perpetual growth after the horizon as a decimal
/// * `horizon_years` - Number of explicitly discounted years
///
/// # Returns
/// Total intrinsic value. No guards: `wacc == terminal_growth_rate` gives an
/// infinite or NaN result and `wacc < terminal_growth_rate` a negative terminal
/// value, both of which the caller is expected to rule out beforehand.
pub fn intrinsic_value(
    fcf: f64,
    wacc: f64,
    growth_rate: f64,
    terminal_growth_rate: f64,
    horizon_years: u32,
) -> f64 {
    let growth = 1.0 + growth_rate;
    let discount = 1.0 + wacc;
    let n = horizon_exponent(horizon_years);

    let discounted_fcf: f64 = (1..=n)
        .map(|t| fcf * growth.powi(t) / discount.powi(t))
        .sum();

    // Gordon growth on the final-year cash flow, discounted back from the horizon
    let final_fcf = fcf * growth.powi(n);
    let terminal_value = final_fcf * (1.0 + terminal_growth_rate) / (wacc - terminal_growth_rate);
    let pv_terminal_value = terminal_value / discount.powi(n);

    discounted_fcf + pv_terminal_value
}

/// `powi` exponent for a horizon; saturates rather than wrapping negative
fn horizon_exponent(horizon_years: u32) -> i32 {
    i32::try_from(horizon_years).unwrap_or(i32::MAX)
}
