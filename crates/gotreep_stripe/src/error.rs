// --- File: crates/gotreep_stripe/src/error.rs ---
use gotreep_common::{external_service_error, GotreepError, HttpStatusCode};
use thiserror::Error;

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Stripe configuration
    #[error("Stripe configuration missing or incomplete")]
    ConfigError,

    /// The checkout amount could not be derived from the request
    #[error("Invalid checkout amount: {0}")]
    InvalidAmount(String),

    /// Internal processing error
    #[error("Internal processing error: {0}")]
    InternalError(String),
}

/// Convert StripeError to GotreepError
impl From<StripeError> for GotreepError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::RequestError(e) => {
                GotreepError::HttpError(format!("Stripe request error: {}", e))
            }
            StripeError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Stripe API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            StripeError::ParseError(e) => {
                GotreepError::ParseError(format!("Stripe response parse error: {}", e))
            }
            StripeError::ConfigError => GotreepError::ConfigError(
                "Stripe configuration missing or incomplete".to_string(),
            ),
            StripeError::InvalidAmount(msg) => GotreepError::ValidationError(msg),
            StripeError::InternalError(msg) => {
                GotreepError::InternalError(format!("Stripe internal error: {}", msg))
            }
        }
    }
}

impl HttpStatusCode for StripeError {
    fn status_code(&self) -> u16 {
        match self {
            StripeError::InvalidAmount(_) => 400,
            StripeError::RequestError(_)
            | StripeError::ApiError { .. }
            | StripeError::ParseError(_)
            | StripeError::ConfigError
            | StripeError::InternalError(_) => 500,
        }
    }
}
