//! Request layer: wire records, validation, routing and error mapping

mod error;
mod request;
mod response;
pub mod validation;
pub mod handler;

pub use error::{ApiError, ValidationError};
pub use request::{CalculateRequest, CustomGrowthRequest};
pub use response::{
    CalculateResponse, SensitivityEntry, CustomGrowthResponse, ProjectionEntry, ErrorResponse,
};
pub use validation::{Validate, ValidationResult, MAX_PROJECTION_YEARS};
pub use handler::{handle_request, ApiResponse, CALCULATE_PATH, CUSTOM_GROWTH_PATH};
