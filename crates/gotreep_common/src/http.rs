// --- File: crates/gotreep_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::{GotreepError, HttpStatusCode};

pub mod client;

/// Static body message for every client error.
pub const INVALID_INPUT: &str = "Invalid input";

/// JSON body returned on every failed request: `{message, error?}`.
#[derive(Debug, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An HTTP status plus the fixed error body.
#[derive(Debug)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiErrorResponse {
    /// 400 `{message: "Invalid input"}`.
    pub fn invalid_input() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                message: INVALID_INPUT.to_string(),
                error: None,
            },
        }
    }

    /// Maps an error onto the response shape.
    ///
    /// Validation errors become the static 400. Everything else becomes a 500
    /// carrying `message` and the raw error text.
    pub fn from_error(message: &str, err: GotreepError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status == StatusCode::BAD_REQUEST {
            info!("Rejected request: {}", err);
            return Self::invalid_input();
        }
        error!("{}: {}", message, err);
        Self {
            status,
            body: ApiErrorBody {
                message: message.to_string(),
                error: Some(err.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Converts a `Result<T, GotreepError>` into a handler result, wrapping the
/// success value in `Json` and labelling failures with `message`.
pub fn map_json_error<T>(
    result: Result<T, GotreepError>,
    message: &str,
) -> Result<Json<T>, ApiErrorResponse>
where
    T: Serialize,
{
    result
        .map(Json)
        .map_err(|err| ApiErrorResponse::from_error(message, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{external_service_error, validation_error};

    #[test]
    fn validation_error_becomes_static_400() {
        let response = ApiErrorResponse::from_error("Error creating booking", validation_error("no email"));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body,
            ApiErrorBody {
                message: "Invalid input".to_string(),
                error: None
            }
        );
    }

    #[test]
    fn upstream_error_becomes_500_with_raw_text() {
        let response = ApiErrorResponse::from_error(
            "Error searching for city",
            external_service_error("Amadeus", "[500] SYSTEM ERROR HAS OCCURRED"),
        );
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body.message, "Error searching for city");
        assert!(response
            .body
            .error
            .as_deref()
            .unwrap()
            .contains("SYSTEM ERROR HAS OCCURRED"));
    }

    #[test]
    fn invalid_input_serializes_without_error_field() {
        let body = serde_json::to_value(ApiErrorResponse::invalid_input().body).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Invalid input"}));
    }
}
