//! Wire response records

use crate::valuation::{percentage_difference, CustomGrowthValuation, ImpliedValuation};
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /calculate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Decimal, not percent
    pub implied_growth_rate: f64,
    pub intrinsic_value: f64,
    pub implied_stock_price: f64,
    pub sensitivity_analysis: Vec<SensitivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    /// Percent, not decimal
    pub implied_growth_rate: f64,
    pub implied_stock_price: f64,

    /// Gap to the market price in percent, when one was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_difference: Option<f64>,
}

/// Body of a successful `POST /custom-growth`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGrowthResponse {
    pub implied_stock_price: f64,

    /// Prices for years 1..=3
    pub projected_prices: Vec<f64>,

    pub projections: Vec<ProjectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionEntry {
    pub year: u32,
    pub stock_price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_difference: Option<f64>,
}

/// Body of every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl CalculateResponse {
    pub fn new(valuation: &ImpliedValuation, current_stock_price: Option<f64>) -> Self {
        let sensitivity_analysis = valuation
            .sensitivity
            .iter()
            .map(|point| SensitivityEntry {
                implied_growth_rate: point.implied_growth_rate_pct,
                implied_stock_price: point.implied_stock_price,
                percentage_difference: percentage_difference(
                    point.implied_stock_price,
                    current_stock_price,
                ),
            })
            .collect();

        Self {
            implied_growth_rate: valuation.implied_growth_rate(),
            intrinsic_value: valuation.intrinsic_value,
            implied_stock_price: valuation.implied_stock_price,
            sensitivity_analysis,
        }
    }
}

impl CustomGrowthResponse {
    pub fn new(valuation: &CustomGrowthValuation, current_stock_price: Option<f64>) -> Self {
        Self {
            implied_stock_price: valuation.implied_stock_price,
            projected_prices: valuation
                .projections
                .iter()
                .map(|p| p.projected_stock_price)
                .collect(),
            projections: valuation
                .projections
                .iter()
                .map(|p| ProjectionEntry {
                    year: p.period,
                    stock_price: p.projected_stock_price,
                    percentage_difference: percentage_difference(
                        p.projected_stock_price,
                        current_stock_price,
                    ),
                })
                .collect(),
        }
    }
}
