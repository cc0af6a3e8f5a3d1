// --- File: crates/gotreep_common/src/models.rs ---

//! Flight-provider payloads.
//!
//! Only the fields the backend reads or adds are typed. Every struct keeps the
//! rest of the provider JSON in a flattened `extra` map so responses pass
//! through unmodified apart from the added display fields. Fields the backend
//! only reads are held as raw JSON values, so an unexpected type never fails
//! the whole response; it just takes no part in the enrichment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Reads a price given either as a JSON number or a numeric string.
///
/// Non-finite values (`"NaN"`, `"inf"`) are rejected.
pub fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    price.filter(|p| p.is_finite())
}

/// The string content of a read-only field, if it holds a string.
pub fn text(field: &Option<Value>) -> Option<&str> {
    field.as_ref().and_then(Value::as_str)
}

/// Tag written to each offer's `offer-type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum OfferType {
    Cheapest,
    Fastest,
    #[serde(rename = "normal")]
    Normal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    #[serde(rename = "offer-type", default, skip_serializing_if = "Option::is_none")]
    pub offer_type: Option<OfferType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itineraries: Option<Vec<Itinerary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlightOffer {
    /// Numeric grand total, if present, parseable and finite.
    pub fn total_price(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(|p| p.total.as_ref())
            .and_then(parse_price)
    }

    /// ISO-8601 duration of the outbound itinerary.
    pub fn first_itinerary_duration(&self) -> Option<&str> {
        self.itineraries
            .as_deref()
            .and_then(<[Itinerary]>::first)
            .and_then(|i| text(&i.duration))
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.itineraries
            .iter()
            .flatten()
            .flat_map(|i| i.segments.iter().flatten())
    }

    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        self.itineraries
            .iter_mut()
            .flatten()
            .flat_map(|i| i.segments.iter_mut().flatten())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<FlightEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<FlightEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<Aircraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating: Option<OperatingCarrier>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingCarrier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lookup tables the provider ships alongside offers.
///
/// Each table stays absent when the provider omitted it and empty when the
/// provider sent it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionaries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<BTreeMap<String, LocationEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carriers: Option<BTreeMap<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dictionaries {
    pub fn location(&self, iata_code: &str) -> Option<&LocationEntry> {
        self.locations.as_ref()?.get(iata_code)
    }

    pub fn aircraft_name(&self, code: &str) -> Option<&str> {
        self.aircraft.as_ref()?.get(code)?.as_str()
    }

    pub fn carrier_name(&self, code: &str) -> Option<&str> {
        self.carriers.as_ref()?.get(code)?.as_str()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a flight-offers search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FlightOffer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Dictionaries>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlightOffersResponse {
    pub fn offers(&self) -> &[FlightOffer] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn offers_mut(&mut self) -> &mut [FlightOffer] {
        self.data.as_deref_mut().unwrap_or_default()
    }
}

/// Body of a flight-offers pricing call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResponse {
    pub data: PricingData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Dictionaries>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PricingResponse {
    pub fn offers(&self) -> &[FlightOffer] {
        self.data.flight_offers.as_deref().unwrap_or_default()
    }

    pub fn offers_mut(&mut self) -> &mut [FlightOffer] {
        self.data.flight_offers.as_deref_mut().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_offers: Option<Vec<FlightOffer>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters of a flight-offers search, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOfferQuery {
    pub origin: String,
    pub destination: String,
    /// `YYYY-MM-DD`
    pub departure_date: String,
    /// `YYYY-MM-DD`
    pub return_date: Option<String>,
    pub adults: u32,
    pub non_stop: Option<bool>,
}

/// A booking to submit to the provider. Traveler and contact records are
/// forwarded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOrder {
    pub flight_offer: Value,
    pub travelers: Value,
    pub contacts: Value,
    pub remark: String,
    pub ticketing_delay: String,
}

/// A checkout to open with the payment provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub customer_email: String,
    /// Amount in minor currency units (cents).
    pub amount: i64,
    pub currency: String,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// An email ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResult {
    pub id: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "type": "flight-offer",
            "id": "1",
            "price": {"currency": "EUR", "total": "100.00", "base": "80.00"},
            "itineraries": [{
                "duration": "PT2H10M",
                "segments": [{
                    "carrierCode": "IB",
                    "number": "3100",
                    "departure": {"iataCode": "MAD", "at": "2025-07-01T10:00:00"},
                    "arrival": {"iataCode": "CDG", "terminal": "2"}
                }]
            }],
            "validatingAirlineCodes": ["IB"]
        });

        let offer: FlightOffer = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(offer.total_price(), Some(100.0));
        assert_eq!(offer.first_itinerary_duration(), Some("PT2H10M"));
        assert_eq!(serde_json::to_value(&offer).unwrap(), raw);
    }

    #[test]
    fn offer_type_serializes_under_hyphenated_key() {
        let offer = FlightOffer {
            offer_type: Some(OfferType::Normal),
            ..Default::default()
        };
        let value = serde_json::to_value(&offer).unwrap();
        assert_eq!(value["offer-type"], "normal");
    }

    #[test]
    fn unparseable_total_has_no_price() {
        let offer: FlightOffer =
            serde_json::from_value(json!({"price": {"total": "n/a"}})).unwrap();
        assert_eq!(offer.total_price(), None);
    }

    #[test]
    fn non_finite_totals_have_no_price() {
        for total in ["NaN", "inf", "-infinity"] {
            let offer: FlightOffer =
                serde_json::from_value(json!({"price": {"total": total}})).unwrap();
            assert_eq!(offer.total_price(), None, "{}", total);
        }
    }

    #[test]
    fn unexpected_types_in_read_fields_are_kept_verbatim() {
        let raw = json!({
            "price": {"total": 50.5},
            "itineraries": [{
                "duration": 7200,
                "segments": [{
                    "carrierCode": 42,
                    "departure": {"iataCode": "MAD"},
                    "aircraft": {"code": 320}
                }]
            }]
        });

        let offer: FlightOffer = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(offer.total_price(), Some(50.5));
        assert_eq!(offer.first_itinerary_duration(), None);
        assert_eq!(text(&offer.segments().next().unwrap().carrier_code), None);
        assert_eq!(
            serde_json::to_value(&offer).unwrap(),
            json!({
                "price": {"total": 50.5},
                "itineraries": [{
                    "duration": 7200,
                    "segments": [{
                        "carrierCode": 42,
                        "departure": {"iataCode": "MAD"},
                        "aircraft": {"code": 320}
                    }]
                }]
            })
        );
    }

    #[test]
    fn absent_and_empty_collections_round_trip_as_sent() {
        let absent = json!({"meta": {"count": 0}});
        let response: FlightOffersResponse = serde_json::from_value(absent.clone()).unwrap();
        assert!(response.offers().is_empty());
        assert_eq!(serde_json::to_value(&response).unwrap(), absent);

        let empty = json!({
            "data": [],
            "dictionaries": {"locations": {}, "aircraft": {}, "carriers": {}}
        });
        let response: FlightOffersResponse = serde_json::from_value(empty.clone()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), empty);
    }

    #[test]
    fn dictionary_lookups_ignore_non_string_names() {
        let dicts: Dictionaries = serde_json::from_value(json!({
            "aircraft": {"320": "AIRBUS A320", "321": 5},
            "carriers": {"IB": "IBERIA"}
        }))
        .unwrap();
        assert_eq!(dicts.aircraft_name("320"), Some("AIRBUS A320"));
        assert_eq!(dicts.aircraft_name("321"), None);
        assert_eq!(dicts.carrier_name("IB"), Some("IBERIA"));
        assert!(dicts.location("MAD").is_none());
    }
}
