//! Routing, decoding and response encoding
//!
//! Independent of any HTTP server: takes method, path and raw body, returns a
//! status, headers and a JSON body. The Lambda binary is a thin adapter on top.

use super::error::ApiError;
use super::request::{CalculateRequest, CustomGrowthRequest};
use super::response::{CalculateResponse, CustomGrowthResponse, ErrorResponse};
use super::validation::Validate;
use crate::config::ServiceConfig;
use crate::valuation::{compute_custom_growth_valuation, compute_implied_valuation};
use serde::de::DeserializeOwned;

pub const CALCULATE_PATH: &str = "/calculate";
pub const CUSTOM_GROWTH_PATH: &str = "/custom-growth";

/// A fully rendered HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Handle one request.
///
/// Never fails: every error becomes a JSON `{"error": ...}` body with the
/// matching status code. CORS headers are attached to every response.
pub fn handle_request(method: &str, path: &str, body: &[u8], config: &ServiceConfig) -> ApiResponse {
    let route = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    let result = match (method, route) {
        ("OPTIONS", CALCULATE_PATH | CUSTOM_GROWTH_PATH) => {
            return respond(204, String::new(), config);
        }
        ("POST", CALCULATE_PATH) => calculate(body),
        ("POST", CUSTOM_GROWTH_PATH) => custom_growth(body),
        (_, CALCULATE_PATH | CUSTOM_GROWTH_PATH) => Err(ApiError::MethodNotAllowed {
            method: method.to_string(),
        }),
        _ => Err(ApiError::NotFound { path: path.to_string() }),
    };

    match result {
        Ok(json) => respond(200, json, config),
        Err(err) => {
            log::warn!("{} {} -> {}: {}", method, path, err.status_code(), err);
            let body = serde_json::to_string(&ErrorResponse { error: err.to_string() })
                .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());
            respond(err.status_code(), body, config)
        }
    }
}

fn calculate(body: &[u8]) -> Result<String, ApiError> {
    let request: CalculateRequest = decode(body)?;
    let inputs = request.validate()?;

    log::debug!(
        "Parsed values - EV: {}, FCF: {}, WACC: {}, Terminal Growth Rate: {}, \
         Projection Years: {}, Shares Outstanding: {}",
        inputs.enterprise_value,
        inputs.free_cash_flow,
        inputs.wacc,
        inputs.terminal_growth_rate,
        inputs.horizon_years,
        inputs.shares_outstanding,
    );

    let valuation = compute_implied_valuation(&inputs);
    if !valuation.is_finite() {
        return Err(ApiError::NonFiniteResult);
    }

    if valuation.solver.saturated {
        log::warn!(
            "Enterprise value {} not reachable for growth in [0, 1]; implied growth pinned at {:.8}",
            inputs.enterprise_value,
            valuation.implied_growth_rate(),
        );
    }
    for point in &valuation.sensitivity {
        log::debug!(
            "Sensitivity {:+}pts - growth: {:.4}%, price: {:.4}",
            point.growth_rate_offset_pct,
            point.implied_growth_rate_pct,
            point.implied_stock_price,
        );
    }
    log::info!(
        "Implied growth {:.6} after {} bisections, price {:.4}",
        valuation.implied_growth_rate(),
        valuation.solver.iterations,
        valuation.implied_stock_price,
    );

    let response = CalculateResponse::new(&valuation, request.current_stock_price);
    Ok(serde_json::to_string(&response)?)
}

fn custom_growth(body: &[u8]) -> Result<String, ApiError> {
    let request: CustomGrowthRequest = decode(body)?;
    let inputs = request.validate()?;

    log::debug!(
        "Parsed values - FCF: {}, WACC: {}, Terminal Growth Rate: {}, \
         Projection Years: {}, Shares Outstanding: {}, Custom Growth Rate: {}",
        inputs.free_cash_flow,
        inputs.wacc,
        inputs.terminal_growth_rate,
        inputs.horizon_years,
        inputs.shares_outstanding,
        inputs.custom_growth_rate,
    );

    let valuation = compute_custom_growth_valuation(&inputs);
    if !valuation.is_finite() {
        return Err(ApiError::NonFiniteResult);
    }

    for point in &valuation.projections {
        log::debug!(
            "Projected FCF for year {}: {:.4}, price: {:.4}",
            point.period,
            point.projected_fcf,
            point.projected_stock_price,
        );
    }
    log::info!("Custom growth implied stock price: {:.4}", valuation.implied_stock_price);

    let response = CustomGrowthResponse::new(&valuation, request.current_stock_price);
    Ok(serde_json::to_string(&response)?)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingBody);
    }
    serde_json::from_slice(body).map_err(ApiError::Decode)
}

fn respond(status: u16, body: String, config: &ServiceConfig) -> ApiResponse {
    let mut headers = vec![
        ("Access-Control-Allow-Origin", config.cors_allow_origin.clone()),
        ("Access-Control-Allow-Methods", "POST, OPTIONS".to_string()),
        ("Access-Control-Allow-Headers", "Content-Type".to_string()),
    ];
    if !body.is_empty() {
        headers.push(("Content-Type", "application/json".to_string()));
    }
    ApiResponse { status, headers, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServiceConfig {
        ServiceConfig::default()
    }

    #[test]
    fn test_preflight() {
        let response = handle_request("OPTIONS", "/calculate", b"", &config());
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());
        assert_eq!(response.header("access-control-allow-origin"), Some("*"));
        assert_eq!(response.header("Content-Type"), None);
    }

    #[test]
    fn test_unknown_route() {
        let response = handle_request("POST", "/nope", b"{}", &config());
        assert_eq!(response.status, 404);
        assert!(response.body.contains("\"error\""));
    }

    #[test]
    fn test_wrong_method() {
        let response = handle_request("GET", "/custom-growth", b"", &config());
        assert_eq!(response.status, 405);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
    }

    #[test]
    fn test_trailing_slash() {
        let response = handle_request("OPTIONS", "/custom-growth/", b"", &config());
        assert_eq!(response.status, 204);
    }

    #[test]
    fn test_empty_body() {
        let response = handle_request("POST", "/calculate", b"  ", &config());
        assert_eq!(response.status, 400);
        assert_eq!(response.body, r#"{"error":"Request body is empty."}"#);
    }

    #[test]
    fn test_malformed_json() {
        let response = handle_request("POST", "/calculate", b"{not json", &config());
        assert_eq!(response.status, 400);
        assert!(response.body.contains("Invalid request body"));
    }

    #[test]
    fn test_configured_origin() {
        let config = ServiceConfig {
            cors_allow_origin: "http://localhost:3000".to_string(),
            ..Default::default()
        };
        let response = handle_request("OPTIONS", "/calculate", b"", &config);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("http://localhost:3000"));
    }

    #[test]
    fn test_overflowing_valuation_is_rejected() {
        // 1.99^1000 overflows; the response must not carry null prices
        let body = br#"{"free_cash_flow": 1e10, "wacc": 200, "terminal_growth_rate": 2,
            "projection_years": 1000, "shares_outstanding": 1, "custom_growth_rate": 99}"#;
        let response = handle_request("POST", "/custom-growth", body, &config());
        assert_eq!(response.status, 400);
        assert!(!response.body.contains("null"));
        assert!(response.body.contains("not finite"));
    }
}
