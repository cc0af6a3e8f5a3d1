// --- File: crates/gotreep_booking/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::ConfirmRequest;

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::confirm_handler),
    components(schemas(ConfirmRequest, gotreep_common::ApiErrorBody)),
    tags((name = "Booking", description = "Flight order submission"))
)]
pub struct BookingApiDoc;
