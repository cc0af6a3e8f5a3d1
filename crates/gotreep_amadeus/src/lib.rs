// --- File: crates/gotreep_amadeus/src/lib.rs ---

pub mod client;
pub mod countries;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod logos;
pub mod routes;

// Re-export for main backend
pub use client::AmadeusClient;
pub use error::AmadeusError;
pub use handlers::FlightsState;
pub use logos::AirhexLogoService;
pub use routes::routes;
