// --- File: crates/services/gotreep_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds every outbound client once at startup. Handlers only see the
//! `gotreep_common::services` traits.
use gotreep_amadeus::{AirhexLogoService, AmadeusClient};
use gotreep_common::services::{
    FlightProvider, LogoService, NotificationService, PaymentService, ServiceFactory,
};
use gotreep_common::GotreepError;
use gotreep_config::AppConfig;
use gotreep_mail::Smtp2GoNotificationService;
use gotreep_stripe::StripePaymentService;
use std::sync::Arc;
use tracing::{info, warn};

pub struct GotreepServiceFactory {
    flight_provider: Arc<AmadeusClient>,
    logo_service: Arc<AirhexLogoService>,
    payment_service: Arc<StripePaymentService>,
    notification_service: Arc<Smtp2GoNotificationService>,
}

impl GotreepServiceFactory {
    /// Create a new service factory.
    ///
    /// Missing credentials are only warned about here; the affected calls fail
    /// with a configuration error at request time.
    pub fn new(config: &AppConfig) -> Result<Self, GotreepError> {
        if config.amadeus.client_id.is_empty() || config.amadeus.client_secret.is_empty() {
            warn!("Amadeus credentials are not configured");
        }
        if config.stripe.secret_key.is_empty() {
            warn!("Stripe secret key is not configured");
        }
        if config.mail.api_key.is_empty() {
            warn!("SMTP2GO API key is not configured, confirmation emails will fail");
        }

        let flight_provider = Arc::new(AmadeusClient::new(&config.amadeus)?);
        let logo_service = Arc::new(AirhexLogoService::new(&config.logos)?);
        let payment_service = Arc::new(StripePaymentService::new(config.stripe.clone())?);
        let notification_service = Arc::new(Smtp2GoNotificationService::new(config.mail.clone())?);
        info!("Services initialized (Amadeus at {})", config.amadeus.base_url);

        Ok(Self {
            flight_provider,
            logo_service,
            payment_service,
            notification_service,
        })
    }
}

impl ServiceFactory for GotreepServiceFactory {
    fn flight_provider(&self) -> Arc<dyn FlightProvider> {
        self.flight_provider.clone()
    }

    fn logo_service(&self) -> Arc<dyn LogoService> {
        self.logo_service.clone()
    }

    fn payment_service(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }

    fn notification_service(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }
}
