//! Command line reverse DCF
//!
//! `implied` recovers the growth rate priced into an enterprise value;
//! `custom` prices the stock under a chosen growth rate and projects it three
//! years forward. Rates are entered in percent.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use reverse_dcf::api::{ApiError, CalculateRequest, CalculateResponse, CustomGrowthRequest, CustomGrowthResponse, Validate};
use reverse_dcf::valuation::{
    compute_custom_growth_valuation, compute_implied_valuation_with, SolverConfig,
    DEFAULT_PROJECTION_YEARS, DEFAULT_TERMINAL_GROWTH_PCT, DEFAULT_WACC_PCT,
};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "reverse_dcf", version, about = "Market-implied growth and fair value from a DCF model")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Write the result table as CSV instead of text
    #[arg(long, global = true)]
    csv: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve for the growth rate implied by an enterprise value
    Implied(ImpliedArgs),
    /// Price the stock under a custom growth rate
    Custom(CustomArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Current free cash flow
    #[arg(long)]
    fcf: f64,

    /// Discount rate (WACC), percent
    #[arg(long, default_value_t = DEFAULT_WACC_PCT)]
    wacc: f64,

    /// Perpetual growth after the horizon, percent
    #[arg(long, default_value_t = DEFAULT_TERMINAL_GROWTH_PCT, allow_negative_numbers = true)]
    terminal_growth: f64,

    /// Explicit projection horizon in years
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS as i64)]
    years: i64,

    /// Shares outstanding
    #[arg(long)]
    shares: f64,

    /// Market price to compare against
    #[arg(long)]
    current_price: Option<f64>,
}

#[derive(Args, Debug)]
struct ImpliedArgs {
    /// Enterprise value to match
    #[arg(long)]
    enterprise_value: f64,

    #[command(flatten)]
    common: CommonArgs,

    /// JSON file overriding the solver bracket/tolerance
    #[arg(long)]
    solver_config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CustomArgs {
    /// Assumed growth rate, percent (strictly between -100 and 100)
    #[arg(long, allow_negative_numbers = true)]
    growth: f64,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Implied(args) => run_implied(args, cli.csv),
        Command::Custom(args) => run_custom(args, cli.csv),
    }
}

fn run_implied(args: ImpliedArgs, csv: bool) -> Result<()> {
    let solver_config = match &args.solver_config {
        Some(path) => load_solver_config(path)?,
        None => SolverConfig::default(),
    };

    // The /calculate request takes decimal rates
    let request = CalculateRequest {
        enterprise_value: args.enterprise_value,
        free_cash_flow: args.common.fcf,
        wacc: args.common.wacc / 100.0,
        terminal_growth_rate: args.common.terminal_growth / 100.0,
        projection_years: args.common.years,
        shares_outstanding: args.common.shares,
        current_stock_price: args.common.current_price,
    };
    let inputs = request.validate()?;
    log::debug!("Validated inputs: {:?}", inputs);

    let valuation = compute_implied_valuation_with(&inputs, &solver_config);
    if !valuation.is_finite() {
        return Err(ApiError::NonFiniteResult.into());
    }
    if valuation.solver.saturated {
        log::warn!("Enterprise value is outside the solver bracket; growth rate pinned to a bound");
    }
    let response = CalculateResponse::new(&valuation, args.common.current_price);

    if csv {
        let mut writer = csv::Writer::from_writer(io::stdout());
        writer.write_record(["growth_rate_pct", "stock_price", "percentage_difference"])?;
        let mut rows = vec![(response.implied_growth_rate * 100.0, response.implied_stock_price)];
        rows.extend(
            response
                .sensitivity_analysis
                .iter()
                .map(|e| (e.implied_growth_rate, e.implied_stock_price)),
        );
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (growth_pct, price) in rows {
            writer.write_record([
                format!("{:.6}", growth_pct),
                format!("{:.6}", price),
                format_difference(price, args.common.current_price),
            ])?;
        }
        writer.flush()?;
        return Ok(());
    }

    println!("Implied growth rate:  {:.4}%", response.implied_growth_rate * 100.0);
    println!("Intrinsic value:      {:.2}", response.intrinsic_value);
    println!("Implied stock price:  {:.2}", response.implied_stock_price);
    println!("Bisection steps:      {}", valuation.solver.iterations);
    println!();
    println!("{:<12} {:<14} {:<10}", "Growth %", "Stock price", "vs market");
    for entry in &response.sensitivity_analysis {
        println!(
            "{:<12.4} {:<14.2} {:<10}",
            entry.implied_growth_rate,
            entry.implied_stock_price,
            entry
                .percentage_difference
                .map(|d| format!("{:+.2}%", d))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    Ok(())
}

fn run_custom(args: CustomArgs, csv: bool) -> Result<()> {
    // The /custom-growth request takes percentages and scales them itself
    let request = CustomGrowthRequest {
        free_cash_flow: args.common.fcf,
        wacc: args.common.wacc,
        terminal_growth_rate: args.common.terminal_growth,
        projection_years: args.common.years,
        shares_outstanding: args.common.shares,
        custom_growth_rate: args.growth,
        current_stock_price: args.common.current_price,
    };
    let inputs = request.validate()?;
    log::debug!("Validated inputs: {:?}", inputs);

    let valuation = compute_custom_growth_valuation(&inputs);
    if !valuation.is_finite() {
        return Err(ApiError::NonFiniteResult.into());
    }
    let response = CustomGrowthResponse::new(&valuation, args.common.current_price);

    if csv {
        let mut writer = csv::Writer::from_writer(io::stdout());
        writer.write_record(["year", "stock_price", "percentage_difference"])?;
        writer.write_record([
            "0".to_string(),
            format!("{:.6}", response.implied_stock_price),
            format_difference(response.implied_stock_price, args.common.current_price),
        ])?;
        for entry in &response.projections {
            writer.write_record([
                entry.year.to_string(),
                format!("{:.6}", entry.stock_price),
                format_difference(entry.stock_price, args.common.current_price),
            ])?;
        }
        writer.flush()?;
        return Ok(());
    }

    println!("Implied stock price at {:.2}% growth: {:.2}", args.growth, response.implied_stock_price);
    println!();
    println!("{:<6} {:<14} {:<10}", "Year", "Stock price", "vs market");
    for entry in &response.projections {
        println!(
            "{:<6} {:<14.2} {:<10}",
            entry.year,
            entry.stock_price,
            entry
                .percentage_difference
                .map(|d| format!("{:+.2}%", d))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    Ok(())
}

fn load_solver_config(path: &Path) -> Result<SolverConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read solver config {}", path.display()))?;
    let config: SolverConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid solver config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid solver config {}", path.display()))?;
    Ok(config)
}

fn format_difference(price: f64, current_price: Option<f64>) -> String {
    reverse_dcf::valuation::percentage_difference(price, current_price)
        .map(|d| format!("{:.6}", d))
        .unwrap_or_default()
}
