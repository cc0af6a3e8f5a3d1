// --- File: crates/gotreep_amadeus/src/error.rs ---
use gotreep_common::{external_service_error, GotreepError, HttpStatusCode};
use serde_json::Value;
use thiserror::Error;

/// Amadeus-specific error types.
#[derive(Error, Debug)]
pub enum AmadeusError {
    /// Error occurred during an Amadeus API request
    #[error("Amadeus API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The token endpoint rejected the client credentials
    #[error("Amadeus authentication failed: {0}")]
    AuthError(String),

    /// Error returned by the Amadeus API
    #[error("Amadeus API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing an Amadeus API response
    #[error("Failed to parse Amadeus API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing client credentials
    #[error("Amadeus configuration missing or incomplete: {0}")]
    ConfigError(String),
}

impl From<AmadeusError> for GotreepError {
    fn from(err: AmadeusError) -> Self {
        match err {
            AmadeusError::RequestError(e) => {
                GotreepError::HttpError(format!("Amadeus request error: {}", e))
            }
            AmadeusError::AuthError(msg) => external_service_error("Amadeus auth", msg),
            AmadeusError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Amadeus API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            AmadeusError::ParseError(e) => {
                GotreepError::ParseError(format!("Amadeus response parse error: {}", e))
            }
            AmadeusError::ConfigError(msg) => GotreepError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for AmadeusError {
    fn status_code(&self) -> u16 {
        500
    }
}

/// Pulls a readable message out of an Amadeus error body.
///
/// Amadeus answers with `{"errors": [{"title", "detail"}]}` on API calls and
/// `{"error", "error_description"}` on the token endpoint. Anything else is
/// returned as is.
pub fn api_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    if let Some(errors) = json.get("errors").and_then(Value::as_array) {
        let parts: Vec<String> = errors
            .iter()
            .filter_map(|e| {
                let title = e.get("title").and_then(Value::as_str);
                let detail = e.get("detail").and_then(Value::as_str);
                match (title, detail) {
                    (Some(t), Some(d)) => Some(format!("{}: {}", t, d)),
                    (Some(t), None) => Some(t.to_string()),
                    (None, Some(d)) => Some(d.to_string()),
                    (None, None) => None,
                }
            })
            .collect();
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    if let Some(description) = json.get("error_description").and_then(Value::as_str) {
        return description.to_string();
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_titles_and_details() {
        let body = r#"{"errors":[
            {"status":400,"code":477,"title":"INVALID FORMAT","detail":"departureDate"},
            {"status":400,"code":32171,"title":"MANDATORY DATA MISSING"}
        ]}"#;
        assert_eq!(
            api_error_message(body),
            "INVALID FORMAT: departureDate; MANDATORY DATA MISSING"
        );
    }

    #[test]
    fn reads_oauth_error_description() {
        let body = r#"{"error":"invalid_client","error_description":"Client credentials are invalid","code":38187}"#;
        assert_eq!(api_error_message(body), "Client credentials are invalid");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(api_error_message(r#"{"foo":1}"#), r#"{"foo":1}"#);
    }

    #[test]
    fn api_error_keeps_message_in_common_error() {
        let err: GotreepError = AmadeusError::ApiError {
            status_code: 500,
            message: "SYSTEM ERROR HAS OCCURRED".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("SYSTEM ERROR HAS OCCURRED"));
    }
}
