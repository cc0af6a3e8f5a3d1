// --- File: crates/gotreep_stripe/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{BookingRequest, BookingResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::create_booking_handler),
    components(schemas(BookingRequest, BookingResponse, gotreep_common::ApiErrorBody)),
    tags((name = "Booking", description = "Stripe Checkout for flight bookings"))
)]
pub struct StripeApiDoc;
