// --- File: crates/gotreep_amadeus/src/routes.rs ---

use crate::handlers::{price_handler, search_cities_handler, search_flights_handler, FlightsState};
use axum::{
    routing::{get, post},
    Router,
};
use gotreep_common::services::{FlightProvider, LogoService};
use gotreep_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing the city, flight search and pricing routes.
pub fn routes(
    config: Arc<AppConfig>,
    provider: Arc<dyn FlightProvider>,
    logos: Arc<dyn LogoService>,
) -> Router {
    let flights_state = Arc::new(FlightsState {
        config,
        provider,
        logos,
    });

    Router::new()
        .route("/cities", get(search_cities_handler))
        .route("/flights", get(search_flights_handler))
        .route("/price", post(price_handler))
        .with_state(flights_state)
}
