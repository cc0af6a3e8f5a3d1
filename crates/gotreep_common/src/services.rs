// --- File: crates/gotreep_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers only see these traits. Concrete clients (Amadeus, Airhex, Stripe,
//! SMTP2GO) are built once at startup by a [`ServiceFactory`] and injected as
//! `Arc<dyn Trait>`, which keeps handlers testable with in-memory fakes.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::GotreepError;
use crate::models::{
    CheckoutRequest, CheckoutSession, EmailMessage, FlightOfferQuery, FlightOffersResponse,
    FlightOrder, NotificationResult, PricingResponse,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Flight search and booking provider.
pub trait FlightProvider: Send + Sync {
    /// Look up cities and airports matching `keyword`. Returns the provider body as is.
    fn search_locations(&self, keyword: &str) -> BoxFuture<'_, Value, GotreepError>;

    /// Search flight offers.
    fn search_flight_offers(
        &self,
        query: FlightOfferQuery,
    ) -> BoxFuture<'_, FlightOffersResponse, GotreepError>;

    /// Re-price offers previously returned by a search.
    fn price_flight_offers(
        &self,
        flight_offers: Vec<Value>,
    ) -> BoxFuture<'_, PricingResponse, GotreepError>;

    /// Submit a flight order. Returns the provider's order record.
    fn create_flight_order(&self, order: FlightOrder) -> BoxFuture<'_, Value, GotreepError>;
}

/// Airline logo lookup.
pub trait LogoService: Send + Sync {
    /// Resolve the logo URL for a carrier at `size`×`size` pixels.
    ///
    /// An empty string means the logo service had no image for the carrier.
    fn logo_url(&self, carrier_code: &str, size: u32) -> BoxFuture<'_, String, GotreepError>;
}

/// A trait for payment service operations.
pub trait PaymentService: Send + Sync {
    /// Open a hosted checkout session.
    fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> BoxFuture<'_, CheckoutSession, GotreepError>;
}

/// A trait for notification service operations.
pub trait NotificationService: Send + Sync {
    /// Send an HTML email.
    fn send_email(&self, message: EmailMessage) -> BoxFuture<'_, NotificationResult, GotreepError>;
}

/// A factory for creating service instances.
///
/// Built once in the backend binary; each route group pulls the services it
/// needs into its own state.
pub trait ServiceFactory: Send + Sync {
    fn flight_provider(&self) -> Arc<dyn FlightProvider>;

    fn logo_service(&self) -> Arc<dyn LogoService>;

    fn payment_service(&self) -> Arc<dyn PaymentService>;

    fn notification_service(&self) -> Arc<dyn NotificationService>;
}
