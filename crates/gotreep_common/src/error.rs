// --- File: crates/gotreep_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Gotreep crates.
///
/// Integration crates define their own error enums and implement
/// `From<TheirError> for GotreepError`.
#[derive(Error, Debug)]
pub enum GotreepError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The caller sent missing or invalid fields
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// An upstream provider rejected or failed the call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for GotreepError {
    fn status_code(&self) -> u16 {
        match self {
            GotreepError::ValidationError(_) => 400,
            // Upstream and parsing failures all surface as 500 to callers.
            GotreepError::HttpError(_)
            | GotreepError::ParseError(_)
            | GotreepError::ConfigError(_)
            | GotreepError::ExternalServiceError { .. }
            | GotreepError::InternalError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for GotreepError {
    fn from(err: reqwest::Error) -> Self {
        GotreepError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for GotreepError {
    fn from(err: serde_json::Error) -> Self {
        GotreepError::ParseError(err.to_string())
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> GotreepError {
    GotreepError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> GotreepError {
    GotreepError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
