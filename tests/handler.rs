//! End-to-end tests of the JSON request layer

use approx::{assert_abs_diff_eq, assert_relative_eq};
use reverse_dcf::api::{CalculateResponse, CustomGrowthResponse, ErrorResponse};
use reverse_dcf::{handle_request, intrinsic_value, ServiceConfig};

fn post(path: &str, body: &str) -> (u16, String) {
    let response = handle_request("POST", path, body.as_bytes(), &ServiceConfig::default());
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
    (response.status, response.body)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body).unwrap().error
}

#[test]
fn calculate_example_scenario() {
    let (status, body) = post(
        "/calculate",
        r#"{
            "enterprise_value": 2500,
            "free_cash_flow": 100,
            "wacc": 0.08,
            "terminal_growth_rate": 0.02,
            "projection_years": 10,
            "shares_outstanding": 50
        }"#,
    );
    assert_eq!(status, 200, "body: {}", body);

    let response: CalculateResponse = serde_json::from_str(&body).unwrap();
    assert!(response.implied_growth_rate > 0.0 && response.implied_growth_rate < 0.08);
    assert_relative_eq!(response.intrinsic_value, 2500.0, max_relative = 1e-6);
    assert_relative_eq!(response.implied_stock_price, response.intrinsic_value / 50.0, max_relative = 1e-12);

    assert_eq!(response.sensitivity_analysis.len(), 2);
    let base_pct = response.implied_growth_rate * 100.0;
    assert_abs_diff_eq!(response.sensitivity_analysis[0].implied_growth_rate, base_pct - 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(response.sensitivity_analysis[1].implied_growth_rate, base_pct + 5.0, epsilon = 1e-9);
    assert!(response.sensitivity_analysis.iter().all(|e| e.percentage_difference.is_none()));
}

#[test]
fn calculate_recovers_known_growth() {
    let target = intrinsic_value(1000.0, 0.10, 0.03, 0.02, 5);
    let body = format!(
        r#"{{"enterprise_value": {}, "free_cash_flow": 1000, "wacc": 0.10,
            "terminal_growth_rate": 0.02, "projection_years": 5, "shares_outstanding": 10}}"#,
        target
    );
    let (status, body) = post("/calculate", &body);
    assert_eq!(status, 200);

    let response: CalculateResponse = serde_json::from_str(&body).unwrap();
    assert_abs_diff_eq!(response.implied_growth_rate, 0.03, epsilon = 1e-6);
}

#[test]
fn calculate_accepts_form_strings_and_market_price() {
    let (status, body) = post(
        "/calculate",
        r#"{
            "current_stock_price": "40",
            "enterprise_value": "2500",
            "free_cash_flow": "100",
            "wacc": 0.08,
            "terminal_growth_rate": 0.02,
            "projection_years": "10",
            "shares_outstanding": "50"
        }"#,
    );
    assert_eq!(status, 200, "body: {}", body);

    let response: CalculateResponse = serde_json::from_str(&body).unwrap();
    for entry in &response.sensitivity_analysis {
        let expected = (entry.implied_stock_price - 40.0) / 40.0 * 100.0;
        assert_relative_eq!(entry.percentage_difference.unwrap(), expected, max_relative = 1e-12);
    }
}

#[test]
fn calculate_rejects_degenerate_spread() {
    let (status, body) = post(
        "/calculate",
        r#"{"enterprise_value": 2500, "free_cash_flow": 100, "wacc": 0.05,
            "terminal_growth_rate": 0.05, "projection_years": 10, "shares_outstanding": 50}"#,
    );
    assert_eq!(status, 400);
    assert_eq!(
        error_message(&body),
        "WACC must be greater than the terminal growth rate and both must be positive."
    );
}

#[test]
fn calculate_rejects_non_positive_shares() {
    let (status, body) = post(
        "/calculate",
        r#"{"enterprise_value": 2500, "free_cash_flow": 100, "wacc": 0.08,
            "terminal_growth_rate": 0.02, "projection_years": 10, "shares_outstanding": 0}"#,
    );
    assert_eq!(status, 400);
    assert!(error_message(&body).contains("shares_outstanding"));
}

#[test]
fn calculate_saturates_instead_of_failing() {
    // Worth ~1458 at zero growth; a target of 100 pins the rate to the lower bound
    let (status, body) = post(
        "/calculate",
        r#"{"enterprise_value": 100, "free_cash_flow": 100, "wacc": 0.08,
            "terminal_growth_rate": 0.02, "projection_years": 10, "shares_outstanding": 50}"#,
    );
    assert_eq!(status, 200);

    let response: CalculateResponse = serde_json::from_str(&body).unwrap();
    assert!(response.implied_growth_rate < 1e-8);
}

#[test]
fn calculate_rejects_overflowing_valuation() {
    // Saturates near g = 1, where 2^1000 / 3^1000 evaluates to inf / inf
    let (status, body) = post(
        "/calculate",
        r#"{"enterprise_value": 1e300, "free_cash_flow": 1e10, "wacc": 2.0,
            "terminal_growth_rate": 0.02, "projection_years": 1000, "shares_outstanding": 1}"#,
    );
    assert_eq!(status, 400, "body: {}", body);
    assert!(error_message(&body).contains("not finite"));
}

#[test]
fn calculate_missing_field() {
    let (status, body) = post("/calculate", r#"{"free_cash_flow": 100}"#);
    assert_eq!(status, 400);
    assert!(error_message(&body).contains("missing field"));
}

#[test]
fn custom_growth_projection_scenario() {
    let (status, body) = post(
        "/custom-growth",
        r#"{
            "free_cash_flow": 100,
            "wacc": 8,
            "terminal_growth_rate": 2,
            "projection_years": 10,
            "shares_outstanding": 50,
            "custom_growth_rate": 5
        }"#,
    );
    assert_eq!(status, 200, "body: {}", body);

    let response: CustomGrowthResponse = serde_json::from_str(&body).unwrap();
    assert_relative_eq!(response.implied_stock_price, 42.83823817962, max_relative = 1e-10);
    assert_eq!(response.projected_prices.len(), 3);
    assert!(response.projected_prices[0] < response.projected_prices[1]);
    assert!(response.projected_prices[1] < response.projected_prices[2]);
    assert_eq!(
        response.projections.iter().map(|p| p.year).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(response.projections[2].stock_price, response.projected_prices[2]);
}

#[test]
fn custom_growth_rejects_out_of_range_rate() {
    let (status, body) = post(
        "/custom-growth",
        r#"{"free_cash_flow": 100, "wacc": 8, "terminal_growth_rate": 2,
            "projection_years": 10, "shares_outstanding": 50, "custom_growth_rate": 100}"#,
    );
    assert_eq!(status, 400);
    assert_eq!(error_message(&body), "Custom growth rate must be between -100% and 100%.");
}

#[test]
fn custom_growth_rejects_overflowing_valuation() {
    let (status, body) = post(
        "/custom-growth",
        r#"{"free_cash_flow": 1e10, "wacc": 200, "terminal_growth_rate": 2,
            "projection_years": 1000, "shares_outstanding": 1, "custom_growth_rate": 99}"#,
    );
    assert_eq!(status, 400, "body: {}", body);
    assert!(!body.contains("null"));
    assert!(error_message(&body).contains("not finite"));
}

#[test]
fn custom_growth_with_market_price() {
    let (status, body) = post(
        "/custom-growth",
        r#"{"free_cash_flow": "100", "wacc": "8", "terminal_growth_rate": "2",
            "projection_years": "10", "shares_outstanding": "50", "custom_growth_rate": "-3",
            "current_stock_price": "45"}"#,
    );
    assert_eq!(status, 200, "body: {}", body);

    let response: CustomGrowthResponse = serde_json::from_str(&body).unwrap();
    assert!(response.projected_prices[0] > response.projected_prices[2]);
    for entry in &response.projections {
        assert!(entry.percentage_difference.is_some());
    }
}

#[test]
fn preflight_and_unknown_routes() {
    let config = ServiceConfig::default();

    let preflight = handle_request("OPTIONS", "/custom-growth", b"", &config);
    assert_eq!(preflight.status, 204);
    assert_eq!(preflight.header("Access-Control-Allow-Methods"), Some("POST, OPTIONS"));

    let missing = handle_request("POST", "/valuation", b"{}", &config);
    assert_eq!(missing.status, 404);

    let wrong_method = handle_request("GET", "/calculate", b"", &config);
    assert_eq!(wrong_method.status, 405);
}
