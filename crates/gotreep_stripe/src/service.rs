// --- File: crates/gotreep_stripe/src/service.rs ---
use gotreep_common::models::{CheckoutRequest, CheckoutSession};
use gotreep_common::services::{BoxFuture, PaymentService};
use gotreep_common::{create_client, GotreepError, DEFAULT_TIMEOUT_SECS};
use gotreep_config::StripeConfig;
use reqwest::Client;

use crate::error::StripeError;
use crate::logic::create_checkout_session;

/// Stripe payment service implementation
pub struct StripePaymentService {
    client: Client,
    config: StripeConfig,
}

impl StripePaymentService {
    /// Create a new Stripe payment service
    pub fn new(config: StripeConfig) -> Result<Self, StripeError> {
        let client = create_client(DEFAULT_TIMEOUT_SECS, false)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: StripeConfig) -> Self {
        Self { client, config }
    }
}

impl PaymentService for StripePaymentService {
    fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> BoxFuture<'_, CheckoutSession, GotreepError> {
        Box::pin(async move {
            Ok(create_checkout_session(&self.client, &self.config, &request).await?)
        })
    }
}
