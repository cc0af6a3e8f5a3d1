// --- File: crates/gotreep_booking/src/routes.rs ---

use crate::handlers::{confirm_handler, BookingState};
use axum::{routing::post, Router};
use gotreep_common::services::{FlightProvider, NotificationService};
use gotreep_config::AppConfig;
use gotreep_mail::ConfirmationMailer;
use std::sync::Arc;

/// Creates a router containing the booking confirmation route.
pub fn routes(
    config: Arc<AppConfig>,
    provider: Arc<dyn FlightProvider>,
    notifications: Arc<dyn NotificationService>,
) -> Router {
    let mailer = ConfirmationMailer::new(notifications, &config.mail);
    let booking_state = Arc::new(BookingState {
        config,
        provider,
        mailer,
    });

    Router::new()
        .route("/confirm", post(confirm_handler))
        .with_state(booking_state)
}
