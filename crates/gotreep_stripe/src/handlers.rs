// --- File: crates/gotreep_stripe/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use gotreep_common::services::PaymentService;
use gotreep_common::{ApiErrorResponse, GotreepError};
use gotreep_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::logic::{checkout_request_from_booking, BookingRequest, BookingResponse};

pub const BOOKING_ERROR: &str = "Error creating booking";

// --- State for Booking Handlers ---
#[derive(Clone)]
pub struct StripeState {
    pub config: Arc<AppConfig>,
    pub payments: Arc<dyn PaymentService>,
}

/// Axum handler that opens a Stripe Checkout session for a flight.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/booking",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Stripe Checkout Session created", body = BookingResponse),
        (status = 400, description = "Invalid input", body = gotreep_common::ApiErrorBody),
        (status = 500, description = "Stripe API error", body = gotreep_common::ApiErrorBody)
    ),
    tag = "Booking"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<StripeState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, ApiErrorResponse> {
    let Ok(Json(request)) = payload else {
        return Err(ApiErrorResponse::invalid_input());
    };

    let checkout = match checkout_request_from_booking(request, &state.config.stripe) {
        Ok(Some(checkout)) => checkout,
        Ok(None) => return Err(ApiErrorResponse::invalid_input()),
        Err(e) => return Err(ApiErrorResponse::from_error(BOOKING_ERROR, GotreepError::from(e))),
    };
    info!(
        "[Booking] Checkout for {}: {} {}",
        checkout.customer_email, checkout.amount, checkout.currency
    );

    let session = state
        .payments
        .create_checkout_session(checkout)
        .await
        .map_err(|e| ApiErrorResponse::from_error(BOOKING_ERROR, e))?;

    Ok(Json(BookingResponse {
        checkout_url: session.url,
    }))
}
