// --- File: crates/gotreep_amadeus/src/logic.rs ---
//! Flight search and pricing: provider call followed by response enrichment.
//!
//! Enrichment is a single pass over the provider response:
//! tag cheapest/fastest, attach carrier logos, then resolve display names from
//! the response dictionaries.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::try_join_all;
use gotreep_common::models::{
    text, Dictionaries, FlightOffer, FlightOfferQuery, FlightOffersResponse, OfferType,
    PricingResponse,
};
use gotreep_common::services::{FlightProvider, LogoService};
use gotreep_common::{validation_error, GotreepError};
use gotreep_config::{AppConfig, FastestOrdering};
use serde_json::Value;
use tracing::{debug, info};

use crate::countries;

// --- Input normalisation ---

/// Normalises a date to `YYYY-MM-DD`.
///
/// Accepts a plain calendar date or an RFC 3339 timestamp; timestamps are
/// converted to UTC before the date is taken.
pub fn normalize_date(raw: &str) -> Result<String, GotreepError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive().format("%Y-%m-%d").to_string())
        .map_err(|e| validation_error(format!("invalid date '{}': {}", raw, e)))
}

/// Parses an ISO-8601 duration such as `PT2H10M` or `P1DT3H` into seconds.
///
/// Only day, hour, minute and second designators are understood, which covers
/// every itinerary duration Amadeus returns.
pub fn parse_iso_duration(raw: &str) -> Option<u64> {
    let rest = raw.strip_prefix('P')?;
    let mut seconds = 0u64;
    let mut number = String::new();
    let mut in_time = false;
    let mut seen_designator = false;

    for ch in rest.chars() {
        match ch {
            '0'..='9' => number.push(ch),
            'T' if !in_time && number.is_empty() => in_time = true,
            'D' | 'H' | 'M' | 'S' => {
                let value: u64 = number.parse().ok()?;
                number.clear();
                let unit = match (ch, in_time) {
                    ('D', false) => 86_400,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => return None,
                };
                seconds = seconds.checked_add(value.checked_mul(unit)?)?;
                seen_designator = true;
            }
            _ => return None,
        }
    }

    (number.is_empty() && seen_designator).then_some(seconds)
}

// --- Enrichment ---

/// Tags every offer `Cheapest`, `Fastest` or `normal`.
///
/// Cheapest is the lowest finite numeric total; fastest is the smallest outbound
/// itinerary duration under `ordering`. Ties go to the first offer seen. An
/// offer that wins both is tagged `Cheapest`.
pub fn tag_offers(offers: &mut [FlightOffer], ordering: FastestOrdering) {
    let cheapest = index_of_min(offers.iter().map(FlightOffer::total_price), |a, b| a < b);

    let fastest = match ordering {
        FastestOrdering::Lexicographic => index_of_min(
            offers.iter().map(FlightOffer::first_itinerary_duration),
            |a, b| a < b,
        ),
        FastestOrdering::Numeric => index_of_min(
            offers
                .iter()
                .map(|o| o.first_itinerary_duration().and_then(parse_iso_duration)),
            |a, b| a < b,
        ),
    };

    for (i, offer) in offers.iter_mut().enumerate() {
        offer.offer_type = Some(if Some(i) == cheapest {
            OfferType::Cheapest
        } else if Some(i) == fastest {
            OfferType::Fastest
        } else {
            OfferType::Normal
        });
    }
}

/// Index of the first minimum among the `Some` keys.
fn index_of_min<K, I, F>(keys: I, less: F) -> Option<usize>
where
    I: Iterator<Item = Option<K>>,
    F: Fn(&K, &K) -> bool,
{
    let mut best: Option<(usize, K)> = None;
    for (i, key) in keys.enumerate() {
        let Some(key) = key else { continue };
        match &best {
            Some((_, current)) if !less(&key, current) => {}
            _ => best = Some((i, key)),
        }
    }
    best.map(|(i, _)| i)
}

/// Distinct carrier codes across all segments, in first-seen order.
pub fn collect_carrier_codes(offers: &[FlightOffer]) -> Vec<String> {
    let mut seen = HashSet::new();
    offers
        .iter()
        .flat_map(FlightOffer::segments)
        .filter_map(|s| text(&s.carrier_code))
        .filter(|code| seen.insert(*code))
        .map(str::to_string)
        .collect()
}

/// Resolves one logo URL per carrier code concurrently.
///
/// The first transport error aborts the whole batch.
pub async fn fetch_logos(
    logos: &dyn LogoService,
    codes: Vec<String>,
    size: u32,
) -> Result<HashMap<String, String>, GotreepError> {
    debug!("Fetching {} logo(s) at {}px", codes.len(), size);
    let urls = try_join_all(codes.iter().map(|code| logos.logo_url(code, size))).await?;
    Ok(codes.into_iter().zip(urls).collect())
}

/// Writes `airlineLogo` on every segment; unknown carriers get an empty string.
pub fn attach_logos(offers: &mut [FlightOffer], logos: &HashMap<String, String>) {
    for segment in offers.iter_mut().flat_map(FlightOffer::segments_mut) {
        let url = text(&segment.carrier_code)
            .and_then(|code| logos.get(code))
            .cloned()
            .unwrap_or_default();
        segment.airline_logo = Some(url);
    }
}

/// Fills `cityName` and `countryName` on every dictionary location.
pub fn resolve_location_names(dictionaries: &mut Dictionaries) {
    for location in dictionaries.locations.iter_mut().flat_map(|l| l.values_mut()) {
        location.city_name = text(&location.city_code).map(str::to_string);
        location.country_name = text(&location.country_code).map(countries::country_name);
    }
}

/// Copies the location's country name onto each segment endpoint.
///
/// Endpoints whose airport is missing from the dictionary are left untouched.
pub fn resolve_country_names(offers: &mut [FlightOffer], dictionaries: &Dictionaries) {
    let country_of = |iata: &Option<Value>| {
        text(iata)
            .and_then(|code| dictionaries.location(code))
            .and_then(|location| location.country_name.clone())
    };

    for segment in offers.iter_mut().flat_map(FlightOffer::segments_mut) {
        if let Some(departure) = segment.departure.as_mut() {
            if let Some(name) = country_of(&departure.iata_code) {
                departure.country_name = Some(name);
            }
        }
        if let Some(arrival) = segment.arrival.as_mut() {
            if let Some(name) = country_of(&arrival.iata_code) {
                arrival.country_name = Some(name);
            }
        }
    }
}

/// Resolves aircraft and carrier names, defaulting to the raw code.
pub fn resolve_carrier_and_aircraft_names(offers: &mut [FlightOffer], dictionaries: &Dictionaries) {
    let carrier_name = |code: &str| dictionaries.carrier_name(code).unwrap_or(code).to_string();

    for segment in offers.iter_mut().flat_map(FlightOffer::segments_mut) {
        if let Some(aircraft) = segment.aircraft.as_mut() {
            if let Some(code) = text(&aircraft.code) {
                aircraft.name = Some(dictionaries.aircraft_name(code).unwrap_or(code).to_string());
            }
        }
        if let Some(code) = text(&segment.carrier_code) {
            segment.carrier_name = Some(carrier_name(code));
        }
        if let Some(operating) = segment.operating.as_mut() {
            if let Some(code) = text(&operating.carrier_code) {
                operating.carrier_name = Some(carrier_name(code));
            }
        }
    }
}

/// Full enrichment of a search response.
pub fn enrich_search_response(
    response: &mut FlightOffersResponse,
    logos: &HashMap<String, String>,
    ordering: FastestOrdering,
) {
    tag_offers(response.offers_mut(), ordering);
    attach_logos(response.offers_mut(), logos);

    // Without dictionaries every name lookup falls back to the raw code.
    let empty = Dictionaries::default();
    let dictionaries = match response.dictionaries.as_mut() {
        Some(dictionaries) => {
            resolve_location_names(dictionaries);
            &*dictionaries
        }
        None => &empty,
    };
    let offers = response.data.as_deref_mut().unwrap_or_default();
    resolve_country_names(offers, dictionaries);
    resolve_carrier_and_aircraft_names(offers, dictionaries);
}

/// Enrichment of a pricing response: logos and country names only.
pub fn enrich_pricing_response(response: &mut PricingResponse, logos: &HashMap<String, String>) {
    let offers = response.data.flight_offers.as_deref_mut().unwrap_or_default();
    attach_logos(offers, logos);

    if let Some(dictionaries) = response.dictionaries.as_mut() {
        resolve_location_names(dictionaries);
        resolve_country_names(offers, dictionaries);
    }
}

// --- Operations ---

/// Searches offers and returns the enriched provider body.
pub async fn search_flights(
    provider: &dyn FlightProvider,
    logos: &dyn LogoService,
    config: &AppConfig,
    query: FlightOfferQuery,
) -> Result<FlightOffersResponse, GotreepError> {
    let mut response = provider.search_flight_offers(query).await?;
    info!("Provider returned {} flight offer(s)", response.offers().len());

    let codes = collect_carrier_codes(response.offers());
    let logo_urls = fetch_logos(logos, codes, u32::from(config.logos.search_size)).await?;
    enrich_search_response(&mut response, &logo_urls, config.flights.fastest_ordering);
    Ok(response)
}

/// Re-prices offers and returns the enriched provider body.
pub async fn price_flights(
    provider: &dyn FlightProvider,
    logos: &dyn LogoService,
    config: &AppConfig,
    flight_offers: Vec<Value>,
) -> Result<PricingResponse, GotreepError> {
    if flight_offers.is_empty() {
        return Err(validation_error("flightOffers must not be empty"));
    }

    let mut response = provider.price_flight_offers(flight_offers).await?;
    let codes = collect_carrier_codes(response.offers());
    let logo_urls = fetch_logos(logos, codes, u32::from(config.logos.pricing_size)).await?;
    enrich_pricing_response(&mut response, &logo_urls);
    Ok(response)
}
