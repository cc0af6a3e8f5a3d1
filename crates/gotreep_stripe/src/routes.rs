// --- File: crates/gotreep_stripe/src/routes.rs ---

use crate::handlers::{create_booking_handler, StripeState};
use axum::{routing::post, Router};
use gotreep_common::services::PaymentService;
use gotreep_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing the checkout route.
pub fn routes(config: Arc<AppConfig>, payments: Arc<dyn PaymentService>) -> Router {
    let stripe_state = Arc::new(StripeState { config, payments });

    Router::new()
        .route("/booking", post(create_booking_handler))
        .with_state(stripe_state)
}
