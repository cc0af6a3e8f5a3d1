// --- File: crates/gotreep_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

// --- CORS Config ---
// An empty list allows any origin.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily rolling log files. Console only when unset.
    #[serde(default)]
    pub file_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Amadeus Config ---
// Credentials are usually injected via AMADEUS_CLIENT_ID / AMADEUS_CLIENT_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AmadeusConfig {
    /// `https://test.api.amadeus.com` for the test environment,
    /// `https://api.amadeus.com` for production.
    #[serde(default = "default_amadeus_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: default_amadeus_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_amadeus_base_url() -> String {
    "https://test.api.amadeus.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// --- Airline Logo Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogoConfig {
    #[serde(default = "default_logo_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Edge length in pixels of logos attached to search results.
    #[serde(default = "default_search_logo_size")]
    pub search_size: u16,
    /// Edge length in pixels of logos attached to priced offers.
    #[serde(default = "default_pricing_logo_size")]
    pub pricing_size: u16,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            base_url: default_logo_base_url(),
            api_key: String::new(),
            search_size: default_search_logo_size(),
            pricing_size: default_pricing_logo_size(),
        }
    }
}

fn default_logo_base_url() -> String {
    "https://content.airhex.com/content/logos".to_string()
}

fn default_search_logo_size() -> u16 {
    100
}

fn default_pricing_logo_size() -> u16 {
    50
}

/// How the "fastest" offer is chosen from first-itinerary durations.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FastestOrdering {
    /// Raw ISO-8601 strings compared byte-wise ("PT10H" sorts before "PT2H").
    #[default]
    Lexicographic,
    /// Parsed durations compared by total seconds.
    Numeric,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FlightsConfig {
    #[serde(default)]
    pub fastest_ordering: FastestOrdering,
}

// --- Stripe Config ---
// Secret key usually injected via STRIPE_SECRET_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    #[serde(default = "default_stripe_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub secret_key: String,
    /// Stripe substitutes `{CHECKOUT_SESSION_ID}` in this URL.
    #[serde(default = "default_success_url")]
    pub success_url: String,
    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
    /// Currency used when a booking only carries a net total.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_product_name")]
    pub product_name: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            api_base: default_stripe_api_base(),
            secret_key: String::new(),
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
            default_currency: default_currency(),
            product_name: default_product_name(),
        }
    }
}

fn default_stripe_api_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_success_url() -> String {
    "http://localhost:3000/checkout-page/success?session_id={CHECKOUT_SESSION_ID}".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:3000/checkout-page/cancel".to_string()
}

fn default_currency() -> String {
    "eur".to_string()
}

fn default_product_name() -> String {
    "Flight Booking".to_string()
}

// --- Flight Order Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// General remark attached to every flight order.
    #[serde(default = "default_remark")]
    pub remark: String,
    /// Delay before unticketed orders are cancelled, e.g. "6D".
    #[serde(default = "default_ticketing_delay")]
    pub ticketing_delay: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            remark: default_remark(),
            ticketing_delay: default_ticketing_delay(),
        }
    }
}

fn default_remark() -> String {
    "ONLINE BOOKING FROM INCREIBLE VIAJES".to_string()
}

fn default_ticketing_delay() -> String {
    "6D".to_string()
}

// --- Mail Config ---
// API key usually injected via SMTP2GO_API_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailConfig {
    #[serde(default = "default_mail_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_sender")]
    pub sender: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    /// HTML template for the confirmation email. The built-in template is used when unset.
    #[serde(default)]
    pub template_path: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: default_mail_api_url(),
            api_key: String::new(),
            sender: default_sender(),
            subject: default_subject(),
            template_path: None,
        }
    }
}

fn default_mail_api_url() -> String {
    "https://api.smtp2go.com/v3/email/send".to_string()
}

fn default_sender() -> String {
    "bookings@gotreep.com".to_string()
}

fn default_subject() -> String {
    "Booking Confirmation - GoTreep".to_string()
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub amadeus: AmadeusConfig,
    #[serde(default)]
    pub logos: LogoConfig,
    #[serde(default)]
    pub flights: FlightsConfig,
    #[serde(default)]
    pub stripe: StripeConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub mail: MailConfig,
}
