// --- File: crates/gotreep_booking/src/logic.rs ---
use gotreep_common::models::FlightOrder;
use gotreep_common::services::FlightProvider;
use gotreep_common::GotreepError;
use gotreep_config::BookingConfig;
use gotreep_mail::ConfirmationMailer;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Body of `POST /confirm`. Records are forwarded to the provider unchanged.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    /// A priced offer from `POST /price`
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub flight_offer: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<Object>>))]
    pub traveler_info: Option<Value>,
    /// The first contact's `emailAddress` receives the confirmation
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<Object>>))]
    pub contacts: Option<Value>,
}

impl ConfirmRequest {
    /// Builds the order, or `None` when a field is missing or `contacts` is
    /// not a non-empty array.
    pub fn into_order(self, config: &BookingConfig) -> Option<FlightOrder> {
        let flight_offer = self.flight_offer.filter(|v| !v.is_null())?;
        let travelers = self.traveler_info.filter(|v| !v.is_null())?;
        let contacts = self
            .contacts
            .filter(|c| c.as_array().is_some_and(|a| !a.is_empty()))?;

        Some(FlightOrder {
            flight_offer,
            travelers,
            contacts,
            remark: config.remark.clone(),
            ticketing_delay: config.ticketing_delay.clone(),
        })
    }
}

/// `contacts[0].emailAddress`, if present.
pub fn confirmation_recipient(contacts: &Value) -> Option<&str> {
    contacts
        .pointer("/0/emailAddress")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|email| !email.is_empty())
}

/// Submits the order, then mails the confirmation.
///
/// Mail failures are logged and never fail the booking.
pub async fn confirm_booking(
    provider: &dyn FlightProvider,
    mailer: &ConfirmationMailer,
    order: FlightOrder,
) -> Result<Value, GotreepError> {
    let recipient = confirmation_recipient(&order.contacts).map(str::to_string);
    let booking = provider.create_flight_order(order).await?;
    info!(
        "[Confirm] Order created: {}",
        booking.pointer("/data/id").and_then(serde_json::Value::as_str).unwrap_or("<no id>")
    );

    match recipient {
        Some(to) => match mailer.send_booking_confirmation(&to, &booking).await {
            Ok(result) => info!("[Confirm] Confirmation sent to {} ({})", to, result.id),
            Err(e) => warn!("[Confirm] Confirmation email to {} failed: {}", to, e),
        },
        None => warn!("[Confirm] First contact has no emailAddress. No confirmation sent."),
    }

    Ok(booking)
}
