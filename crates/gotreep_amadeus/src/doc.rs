// --- File: crates/gotreep_amadeus/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::PriceRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::search_cities_handler,
        crate::handlers::search_flights_handler,
        crate::handlers::price_handler
    ),
    components(schemas(PriceRequest, gotreep_common::ApiErrorBody)),
    tags(
        (name = "Cities", description = "City and airport lookup"),
        (name = "Flights", description = "Flight search and pricing")
    )
)]
pub struct FlightsApiDoc;
