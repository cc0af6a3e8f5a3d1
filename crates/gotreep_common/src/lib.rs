// --- File: crates/gotreep_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Provider payloads
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{external_service_error, validation_error, GotreepError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, DEFAULT_TIMEOUT_SECS},
    map_json_error, ApiErrorBody, ApiErrorResponse, INVALID_INPUT,
};

// Re-export logging utilities for easier access
pub use logging::init_from_config;

pub use services::{
    BoxFuture, FlightProvider, LogoService, NotificationService, PaymentService, ServiceFactory,
};
