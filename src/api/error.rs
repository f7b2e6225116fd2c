//! Error types for the request layer

use thiserror::Error;

/// A request value that breaks a precondition of the valuation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number.")]
    NonFinite { field: &'static str },

    #[error("Inputs like enterprise value, FCF, and shares outstanding must be positive ({field} = {value}).")]
    NonPositive { field: &'static str, value: f64 },

    #[error("WACC must be greater than the terminal growth rate and both must be positive.")]
    NonPositiveWacc { wacc: f64 },

    /// Also covers equality, where the terminal value divides by zero
    #[error("WACC must be greater than the terminal growth rate and both must be positive.")]
    WaccNotAboveTerminalGrowth { wacc: f64, terminal_growth_rate: f64 },

    #[error("Custom growth rate must be between -100% and 100%.")]
    CustomGrowthOutOfRange { value_pct: f64 },

    #[error("Projection years must be between 1 and {max} (got {years}).")]
    HorizonOutOfRange { years: i64, max: u32 },
}

/// Anything that turns a request into an error response
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body is empty.")]
    MissingBody,

    #[error("Invalid request body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Inputs passed validation but the valuation overflowed
    #[error("Valuation is not finite for these inputs; try a shorter horizon or smaller growth rate.")]
    NonFiniteResult,

    #[error("No route for {path}.")]
    NotFound { path: String },

    #[error("Method {method} not allowed.")]
    MethodNotAllowed { method: String },

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status code for this error
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingBody | Self::Decode(_) | Self::Validation(_) | Self::NonFiniteResult => 400,
            Self::NotFound { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Encode(_) => 500,
        }
    }
}
