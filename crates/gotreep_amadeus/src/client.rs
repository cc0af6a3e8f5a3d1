//! Amadeus Self-Service API client
//!
//! Authenticates with the OAuth2 client-credentials flow and wraps the four
//! endpoints the backend uses: location search, flight-offer search, offer
//! pricing and flight orders. The access token is cached until shortly before
//! it expires.

use std::time::{Duration, Instant};

use gotreep_common::models::{FlightOfferQuery, FlightOffersResponse, FlightOrder, PricingResponse};
use gotreep_common::services::{BoxFuture, FlightProvider};
use gotreep_common::{create_client, GotreepError};
use gotreep_config::AmadeusConfig;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{api_error_message, AmadeusError};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const LOCATIONS_PATH: &str = "/v1/reference-data/locations";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const PRICING_PATH: &str = "/v1/shopping/flight-offers/pricing";
const ORDERS_PATH: &str = "/v1/booking/flight-orders";

/// Refresh the token this long before Amadeus says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

const AMADEUS_JSON: &str = "application/vnd.amadeus+json";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    1799
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// Client for the Amadeus Self-Service API
pub struct AmadeusClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<AccessToken>>,
}

impl AmadeusClient {
    /// Builds a client with its own connection pool and the configured timeout.
    pub fn new(config: &AmadeusConfig) -> Result<Self, AmadeusError> {
        let client = create_client(config.timeout_secs, true)?;
        Ok(Self::with_client(client, config))
    }

    /// Builds a client on top of an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &AmadeusConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: Mutex::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn access_token(&self) -> Result<String, AmadeusError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(AmadeusError::ConfigError(
                "AMADEUS_CLIENT_ID and AMADEUS_CLIENT_SECRET must be set".to_string(),
            ));
        }

        debug!("[Amadeus] Requesting new access token");
        let response = self
            .client
            .post(self.url(TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("[Amadeus] Token request failed with status {}", status);
            return Err(AmadeusError::AuthError(api_error_message(&body)));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let value = token.access_token.clone();
        *cached = Some(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(value)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AmadeusError> {
        let token = self.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                // Force a fresh token on the next call.
                self.token.lock().await.take();
            }
            let message = api_error_message(&body);
            warn!("[Amadeus] API call failed ({}): {}", status, message);
            return Err(AmadeusError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, AmadeusError> {
        let request = self
            .client
            .post(self.url(path))
            .header(header::CONTENT_TYPE, AMADEUS_JSON)
            .body(serde_json::to_vec(body)?);
        self.send(request).await
    }

    /// `GET /v1/reference-data/locations` for cities and airports.
    pub async fn search_locations(&self, keyword: &str) -> Result<Value, AmadeusError> {
        info!("[Amadeus] Searching locations for keyword '{}'", keyword);
        let request = self
            .client
            .get(self.url(LOCATIONS_PATH))
            .query(&[("keyword", keyword), ("subType", "CITY,AIRPORT")]);
        self.send(request).await
    }

    /// `GET /v2/shopping/flight-offers`.
    pub async fn search_flight_offers(
        &self,
        query: &FlightOfferQuery,
    ) -> Result<FlightOffersResponse, AmadeusError> {
        info!(
            "[Amadeus] Searching flights {} -> {} on {}",
            query.origin, query.destination, query.departure_date
        );
        let request = self
            .client
            .get(self.url(FLIGHT_OFFERS_PATH))
            .query(&flight_offer_params(query));
        self.send(request).await
    }

    /// `POST /v1/shopping/flight-offers/pricing`.
    pub async fn price_flight_offers(
        &self,
        flight_offers: Vec<Value>,
    ) -> Result<PricingResponse, AmadeusError> {
        info!("[Amadeus] Pricing {} flight offer(s)", flight_offers.len());
        let body = json!({
            "data": {
                "type": "flight-offers-pricing",
                "flightOffers": flight_offers,
            }
        });
        self.post_json(PRICING_PATH, &body).await
    }

    /// `POST /v1/booking/flight-orders`.
    pub async fn create_flight_order(&self, order: &FlightOrder) -> Result<Value, AmadeusError> {
        info!("[Amadeus] Creating flight order");
        self.post_json(ORDERS_PATH, &flight_order_body(order)).await
    }
}

/// Query string for a flight-offer search. Optional parameters are omitted
/// when unset.
pub fn flight_offer_params(query: &FlightOfferQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("originLocationCode", query.origin.clone()),
        ("destinationLocationCode", query.destination.clone()),
        ("departureDate", query.departure_date.clone()),
        ("adults", query.adults.to_string()),
    ];
    if let Some(return_date) = &query.return_date {
        params.push(("returnDate", return_date.clone()));
    }
    if let Some(non_stop) = query.non_stop {
        params.push(("nonStop", non_stop.to_string()));
    }
    params
}

/// Request body for `POST /v1/booking/flight-orders`.
pub fn flight_order_body(order: &FlightOrder) -> Value {
    json!({
        "data": {
            "type": "flight-order",
            "flightOffers": [order.flight_offer],
            "travelers": order.travelers,
            "remarks": {
                "general": [{
                    "subType": "GENERAL_MISCELLANEOUS",
                    "text": order.remark,
                }]
            },
            "ticketingAgreement": {
                "option": "DELAY_TO_CANCEL",
                "delay": order.ticketing_delay,
            },
            "contacts": order.contacts,
        }
    })
}

impl FlightProvider for AmadeusClient {
    fn search_locations(&self, keyword: &str) -> BoxFuture<'_, Value, GotreepError> {
        let keyword = keyword.to_string();
        Box::pin(async move { Ok(AmadeusClient::search_locations(self, &keyword).await?) })
    }

    fn search_flight_offers(
        &self,
        query: FlightOfferQuery,
    ) -> BoxFuture<'_, FlightOffersResponse, GotreepError> {
        Box::pin(async move { Ok(AmadeusClient::search_flight_offers(self, &query).await?) })
    }

    fn price_flight_offers(
        &self,
        flight_offers: Vec<Value>,
    ) -> BoxFuture<'_, PricingResponse, GotreepError> {
        Box::pin(async move { Ok(AmadeusClient::price_flight_offers(self, flight_offers).await?) })
    }

    fn create_flight_order(&self, order: FlightOrder) -> BoxFuture<'_, Value, GotreepError> {
        Box::pin(async move { Ok(AmadeusClient::create_flight_order(self, &order).await?) })
    }
}
