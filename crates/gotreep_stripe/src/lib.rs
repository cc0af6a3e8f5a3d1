// --- File: crates/gotreep_stripe/src/lib.rs ---

pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
pub mod routes;
pub mod service;

// Re-export for main backend
pub use error::StripeError;
pub use handlers::StripeState;
pub use logic::{BookingRequest, BookingResponse}; // For OpenAPI
pub use routes::routes;
pub use service::StripePaymentService;
