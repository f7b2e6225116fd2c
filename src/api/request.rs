//! Wire request records
//!
//! Numeric fields accept JSON numbers or numeric strings, since browser forms
//! post their values as text. Unknown fields are ignored.

use crate::valuation::DEFAULT_PROJECTION_YEARS;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Body of `POST /calculate`. Rates are decimals (0.08 = 8%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(deserialize_with = "number")]
    pub enterprise_value: f64,

    #[serde(deserialize_with = "number")]
    pub free_cash_flow: f64,

    #[serde(deserialize_with = "number")]
    pub wacc: f64,

    #[serde(deserialize_with = "number")]
    pub terminal_growth_rate: f64,

    #[serde(default = "default_projection_years", deserialize_with = "whole_number")]
    pub projection_years: i64,

    #[serde(deserialize_with = "number")]
    pub shares_outstanding: f64,

    /// Market price to compare modelled prices against
    #[serde(default, deserialize_with = "optional_number")]
    pub current_stock_price: Option<f64>,
}

/// Body of `POST /custom-growth`. Rates are percentages (8 = 8%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGrowthRequest {
    #[serde(deserialize_with = "number")]
    pub free_cash_flow: f64,

    #[serde(deserialize_with = "number")]
    pub wacc: f64,

    #[serde(deserialize_with = "number")]
    pub terminal_growth_rate: f64,

    #[serde(default = "default_projection_years", deserialize_with = "whole_number")]
    pub projection_years: i64,

    #[serde(deserialize_with = "number")]
    pub shares_outstanding: f64,

    #[serde(deserialize_with = "number")]
    pub custom_growth_rate: f64,

    #[serde(default, deserialize_with = "optional_number")]
    pub current_stock_price: Option<f64>,
}

fn default_projection_years() -> i64 { DEFAULT_PROJECTION_YEARS as i64 }

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => parse_float(&text).map_err(de::Error::custom),
    }
}

/// Blank strings and nulls read as "not given"
fn optional_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => parse_float(&text).map(Some).map_err(de::Error::custom),
    }
}

/// Numbers truncate toward zero; strings must be integers
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) if value.is_finite() => Ok(value.trunc() as i64),
        NumberOrText::Number(value) => Err(de::Error::custom(format!(
            "cannot convert {} to an integer",
            value
        ))),
        NumberOrText::Text(text) => text.trim().parse::<i64>().map_err(|_| {
            de::Error::custom(format!("invalid literal for an integer: '{}'", text))
        }),
    }
}

fn parse_float(text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("could not convert string to float: '{}'", text))
}
