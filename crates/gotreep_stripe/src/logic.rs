// --- File: crates/gotreep_stripe/src/logic.rs ---
use gotreep_common::models::{parse_price, CheckoutRequest, CheckoutSession};
use gotreep_config::StripeConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::StripeError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Data Structures ---

/// Request from the frontend to start paying for a flight.
///
/// Either `flightOffer` (a priced offer) or `netTotal` (a flat amount in the
/// default currency) must be present.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "traveller@example.com"))]
    pub email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub flight_offer: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>, example = 149.99))]
    pub net_total: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://checkout.stripe.com/c/pay/cs_test_a1...")
    )]
    pub checkout_url: String,
}

#[derive(Deserialize, Debug)]
struct StripeCheckoutSessionApiResponse {
    id: String,
    url: Option<String>,
}

// --- Amount handling ---

/// `round(price × 100)` as integer minor units.
pub fn amount_in_minor_units(price: f64) -> Result<i64, StripeError> {
    if !price.is_finite() || price < 0.0 {
        return Err(StripeError::InvalidAmount(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    let cents = (price * 100.0).round();
    if cents > i64::MAX as f64 {
        return Err(StripeError::InvalidAmount(format!("price {} is too large", price)));
    }
    Ok(cents as i64)
}

/// Turns a booking request into the checkout to open.
///
/// Returns `Ok(None)` when required fields are missing.
pub fn checkout_request_from_booking(
    request: BookingRequest,
    config: &StripeConfig,
) -> Result<Option<CheckoutRequest>, StripeError> {
    let Some(email) = request.email.filter(|e| !e.trim().is_empty()) else {
        return Ok(None);
    };

    let (price, currency) = match (request.flight_offer, request.net_total) {
        (Some(offer), _) => {
            let price = offer
                .pointer("/price/total")
                .and_then(parse_price)
                .ok_or_else(|| StripeError::InvalidAmount("flightOffer.price.total".to_string()))?;
            let currency = offer
                .pointer("/price/currency")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| config.default_currency.clone());
            (price, currency)
        }
        (None, Some(net_total)) => {
            let price = parse_price(&net_total)
                .ok_or_else(|| StripeError::InvalidAmount("netTotal".to_string()))?;
            (price, config.default_currency.clone())
        }
        (None, None) => return Ok(None),
    };

    Ok(Some(CheckoutRequest {
        customer_email: email,
        amount: amount_in_minor_units(price)?,
        currency: currency.to_lowercase(),
        product_name: config.product_name.clone(),
    }))
}

/// Form body for `POST /v1/checkout/sessions`.
pub fn checkout_form(config: &StripeConfig, request: &CheckoutRequest) -> Vec<(String, String)> {
    vec![
        ("payment_method_types[]".to_string(), "card".to_string()),
        ("mode".to_string(), "payment".to_string()),
        ("success_url".to_string(), config.success_url.clone()),
        ("cancel_url".to_string(), config.cancel_url.clone()),
        ("customer_email".to_string(), request.customer_email.clone()),
        (
            "line_items[0][price_data][currency]".to_string(),
            request.currency.clone(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            request.product_name.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            request.amount.to_string(),
        ),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
    ]
}

// --- Core Logic Function ---

pub async fn create_checkout_session(
    client: &Client,
    stripe_config: &StripeConfig,
    request: &CheckoutRequest,
) -> Result<CheckoutSession, StripeError> {
    info!(
        "[Stripe Logic] Creating Checkout Session: {} {} for {}",
        request.amount, request.currency, request.customer_email
    );

    if stripe_config.secret_key.is_empty() {
        return Err(StripeError::ConfigError);
    }

    let api_url = format!(
        "{}/v1/checkout/sessions",
        stripe_config.api_base.trim_end_matches('/')
    );
    info!("[Stripe Logic] Sending request to Stripe API: {}", api_url);

    let response = client
        .post(&api_url)
        .basic_auth(&stripe_config.secret_key, None::<&str>)
        .form(&checkout_form(stripe_config, request))
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    info!("[Stripe Logic] Stripe API response status: {}", status);

    if status.is_success() {
        let stripe_response: StripeCheckoutSessionApiResponse = serde_json::from_str(&body_text)?;
        match stripe_response.url {
            Some(url) => {
                info!(
                    "[Stripe Logic] Stripe Checkout Session created successfully. URL: {}",
                    url
                );
                Ok(CheckoutSession {
                    id: stripe_response.id,
                    url,
                })
            }
            None => Err(StripeError::InternalError(
                "Stripe response missing checkout URL".to_string(),
            )),
        }
    } else {
        let error_message = match serde_json::from_str::<Value>(&body_text) {
            Ok(json_body) => json_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or(&body_text)
                .to_string(),
            Err(_) => body_text,
        };
        info!(
            "[Stripe Logic] Stripe API request failed with HTTP status: {}. Message: {}",
            status, error_message
        );
        Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message: error_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> StripeConfig {
        StripeConfig {
            secret_key: "sk_test".to_string(),
            default_currency: "eur".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn rounds_to_minor_units() {
        assert_eq!(amount_in_minor_units(100.0).unwrap(), 10000);
        assert_eq!(amount_in_minor_units(19.99).unwrap(), 1999);
        assert_eq!(amount_in_minor_units(0.1 + 0.2).unwrap(), 30);
        assert_eq!(amount_in_minor_units(0.0).unwrap(), 0);
        assert!(amount_in_minor_units(-1.0).is_err());
        assert!(amount_in_minor_units(f64::NAN).is_err());
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_price(&json!("245.60")), Some(245.6));
        assert_eq!(parse_price(&json!(99)), Some(99.0));
        assert_eq!(parse_price(&json!("abc")), None);
        assert_eq!(parse_price(&json!(null)), None);
    }

    #[test]
    fn flight_offer_supplies_amount_and_currency() {
        let request = BookingRequest {
            email: Some("a@b.c".to_string()),
            flight_offer: Some(json!({"price": {"total": "245.60", "currency": "USD"}})),
            net_total: None,
        };
        let checkout = checkout_request_from_booking(request, &config()).unwrap().unwrap();
        assert_eq!(checkout.amount, 24560);
        assert_eq!(checkout.currency, "usd");
        assert_eq!(checkout.customer_email, "a@b.c");
        assert_eq!(checkout.product_name, "Flight Booking");
    }

    #[test]
    fn net_total_uses_default_currency() {
        let request = BookingRequest {
            email: Some("a@b.c".to_string()),
            flight_offer: None,
            net_total: Some(json!(80.5)),
        };
        let checkout = checkout_request_from_booking(request, &config()).unwrap().unwrap();
        assert_eq!(checkout.amount, 8050);
        assert_eq!(checkout.currency, "eur");
    }

    #[test]
    fn missing_fields_yield_none() {
        let no_email = BookingRequest {
            flight_offer: Some(json!({"price": {"total": "1"}})),
            ..Default::default()
        };
        assert!(checkout_request_from_booking(no_email, &config()).unwrap().is_none());

        let no_price = BookingRequest {
            email: Some("a@b.c".to_string()),
            ..Default::default()
        };
        assert!(checkout_request_from_booking(no_price, &config()).unwrap().is_none());
    }

    #[test]
    fn unusable_price_is_invalid_amount() {
        let request = BookingRequest {
            email: Some("a@b.c".to_string()),
            flight_offer: Some(json!({"price": {"total": "free"}})),
            net_total: None,
        };
        assert!(matches!(
            checkout_request_from_booking(request, &config()),
            Err(StripeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn form_has_single_card_line_item() {
        let request = CheckoutRequest {
            customer_email: "a@b.c".to_string(),
            amount: 5000,
            currency: "eur".to_string(),
            product_name: "Flight Booking".to_string(),
        };
        let form = checkout_form(&config(), &request);
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("payment_method_types[]"), Some("card"));
        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("customer_email"), Some("a@b.c"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("5000"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert!(get("success_url").unwrap().contains("{CHECKOUT_SESSION_ID}"));
    }
}
