// --- File: crates/gotreep_mail/src/error.rs ---
use gotreep_common::{external_service_error, GotreepError, HttpStatusCode};
use thiserror::Error;

/// Mail-specific error types.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("SMTP2GO API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("SMTP2GO API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Failed to parse SMTP2GO API response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Mail configuration missing or incomplete")]
    ConfigError,

    /// The email template is malformed.
    #[error("Template error: {0}")]
    TemplateError(String),
}

impl From<MailError> for GotreepError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::RequestError(e) => {
                GotreepError::HttpError(format!("SMTP2GO request error: {}", e))
            }
            MailError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "SMTP2GO API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            MailError::ParseError(e) => {
                GotreepError::ParseError(format!("SMTP2GO response parse error: {}", e))
            }
            MailError::ConfigError => {
                GotreepError::ConfigError("Mail configuration missing or incomplete".to_string())
            }
            MailError::TemplateError(msg) => {
                GotreepError::InternalError(format!("Email template error: {}", msg))
            }
        }
    }
}

impl HttpStatusCode for MailError {
    fn status_code(&self) -> u16 {
        500
    }
}
