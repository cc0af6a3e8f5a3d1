// --- File: crates/gotreep_booking/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use gotreep_common::services::FlightProvider;
use gotreep_common::{map_json_error, ApiErrorResponse};
use gotreep_config::AppConfig;
use gotreep_mail::ConfirmationMailer;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::logic::{confirm_booking, ConfirmRequest};

pub const CONFIRM_ERROR: &str = "Error booking flight";

// --- State for Confirmation Handlers ---
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn FlightProvider>,
    pub mailer: ConfirmationMailer,
}

/// Axum handler that books a priced offer and emails the confirmation.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/confirm",
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Provider flight order"),
        (status = 400, description = "Invalid input", body = gotreep_common::ApiErrorBody),
        (status = 500, description = "Error booking flight", body = gotreep_common::ApiErrorBody)
    ),
    tag = "Booking"
))]
pub async fn confirm_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiErrorResponse> {
    let Ok(Json(request)) = payload else {
        return Err(ApiErrorResponse::invalid_input());
    };
    let Some(order) = request.into_order(&state.config.booking) else {
        return Err(ApiErrorResponse::invalid_input());
    };
    info!("[Confirm] Submitting flight order");

    map_json_error(
        confirm_booking(state.provider.as_ref(), &state.mailer, order).await,
        CONFIRM_ERROR,
    )
}
