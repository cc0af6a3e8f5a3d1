// --- File: crates/gotreep_amadeus/src/handlers.rs ---
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
};
use gotreep_common::models::{FlightOfferQuery, FlightOffersResponse, PricingResponse};
use gotreep_common::services::{FlightProvider, LogoService};
use gotreep_common::{map_json_error, validation_error, ApiErrorResponse, GotreepError};
use gotreep_config::AppConfig;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::logic::{normalize_date, price_flights, search_flights};

pub const CITY_SEARCH_ERROR: &str = "Error searching for city";
pub const FLIGHT_SEARCH_ERROR: &str = "Error searching for flights";
pub const PRICING_ERROR: &str = "Error getting flight pricing";

// --- State for Flight Handlers ---
#[derive(Clone)]
pub struct FlightsState {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn FlightProvider>,
    pub logos: Arc<dyn LogoService>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CitySearchQuery {
    /// Free-text city or airport name
    #[cfg_attr(feature = "openapi", param(example = "Madrid"))]
    pub keyword: Option<String>,
}

/// Query string of `GET /flights`. Everything arrives as text and is validated
/// by [`FlightSearchParams::into_query`].
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchParams {
    /// Departure date, `YYYY-MM-DD` or RFC 3339
    #[cfg_attr(feature = "openapi", param(example = "2025-07-01"))]
    pub departure: Option<String>,
    /// Return date, `YYYY-MM-DD`
    pub arrival: Option<String>,
    #[cfg_attr(feature = "openapi", param(example = "MAD"))]
    pub location_departure: Option<String>,
    #[cfg_attr(feature = "openapi", param(example = "PAR"))]
    pub location_arrival: Option<String>,
    #[cfg_attr(feature = "openapi", param(example = "1"))]
    pub adults: Option<String>,
    pub non_stop: Option<String>,
}

impl FlightSearchParams {
    pub fn into_query(self) -> Result<FlightOfferQuery, GotreepError> {
        let required = |value: Option<String>, name: &str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| validation_error(format!("missing {}", name)))
        };

        let origin = required(self.location_departure, "locationDeparture")?;
        let destination = required(self.location_arrival, "locationArrival")?;
        let departure_date = normalize_date(&required(self.departure, "departure")?)?;
        let return_date = match self.arrival.filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(normalize_date(&raw)?),
            None => None,
        };
        let adults = required(self.adults, "adults")?
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| validation_error("adults must be a positive integer"))?;
        let non_stop = match self.non_stop.as_deref().map(str::trim) {
            None | Some("") => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => return Err(validation_error(format!("invalid nonStop '{}'", other))),
        };

        Ok(FlightOfferQuery {
            origin,
            destination,
            departure_date,
            return_date,
            adults,
            non_stop,
        })
    }
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    /// Offers exactly as returned by `GET /flights`
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub flight_offers: Option<Vec<Value>>,
}

/// Axum handler for city and airport lookup.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/cities",
    params(CitySearchQuery),
    responses(
        (status = 200, description = "Provider location list, unmodified"),
        (status = 400, description = "Invalid input", body = gotreep_common::ApiErrorBody),
        (status = 500, description = "Error searching for city", body = gotreep_common::ApiErrorBody)
    ),
    tag = "Cities"
))]
pub async fn search_cities_handler(
    State(state): State<Arc<FlightsState>>,
    query: Result<Query<CitySearchQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiErrorResponse> {
    let Ok(Query(params)) = query else {
        return Err(ApiErrorResponse::invalid_input());
    };
    info!("[Cities] Query: {:?}", params);
    let Some(keyword) = params.keyword.filter(|k| !k.trim().is_empty()) else {
        return Err(ApiErrorResponse::invalid_input());
    };
    map_json_error(
        state.provider.search_locations(&keyword).await,
        CITY_SEARCH_ERROR,
    )
}

/// Axum handler for flight search with cheapest/fastest tagging and enrichment.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/flights",
    params(FlightSearchParams),
    responses(
        (status = 200, description = "Enriched flight offers"),
        (status = 400, description = "Invalid input", body = gotreep_common::ApiErrorBody),
        (status = 500, description = "Error searching for flights", body = gotreep_common::ApiErrorBody)
    ),
    tag = "Flights"
))]
pub async fn search_flights_handler(
    State(state): State<Arc<FlightsState>>,
    query: Result<Query<FlightSearchParams>, QueryRejection>,
) -> Result<Json<FlightOffersResponse>, ApiErrorResponse> {
    let Ok(Query(params)) = query else {
        return Err(ApiErrorResponse::invalid_input());
    };
    info!("[Flights] Query: {:?}", params);
    let query = params
        .into_query()
        .map_err(|e| ApiErrorResponse::from_error(FLIGHT_SEARCH_ERROR, e))?;

    map_json_error(
        search_flights(
            state.provider.as_ref(),
            state.logos.as_ref(),
            &state.config,
            query,
        )
        .await,
        FLIGHT_SEARCH_ERROR,
    )
}

/// Axum handler for offer re-pricing.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/price",
    request_body = PriceRequest,
    responses(
        (status = 200, description = "Priced and enriched offers"),
        (status = 400, description = "Invalid input", body = gotreep_common::ApiErrorBody),
        (status = 500, description = "Error getting flight pricing", body = gotreep_common::ApiErrorBody)
    ),
    tag = "Flights"
))]
pub async fn price_handler(
    State(state): State<Arc<FlightsState>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<Json<PricingResponse>, ApiErrorResponse> {
    let Ok(Json(request)) = payload else {
        return Err(ApiErrorResponse::invalid_input());
    };
    let flight_offers = request.flight_offers.unwrap_or_default();
    info!("[Price] Pricing {} offer(s)", flight_offers.len());

    map_json_error(
        price_flights(
            state.provider.as_ref(),
            state.logos.as_ref(),
            &state.config,
            flight_offers,
        )
        .await,
        PRICING_ERROR,
    )
}
