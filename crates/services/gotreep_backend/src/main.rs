// File: services/gotreep_backend/src/main.rs
use gotreep_backend::{build_router, GotreepServiceFactory};
use gotreep_common::logging;
use gotreep_config::load_config;
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            process::exit(1);
        }
    };

    // Keep the guard alive so the file writer flushes on shutdown.
    let _log_guard = logging::init_from_config(&config.logging);

    let services = match GotreepServiceFactory::new(&config) {
        Ok(services) => services,
        Err(e) => {
            error!("Failed to initialize services: {}", e);
            process::exit(1);
        }
    };

    let app = build_router(config.clone(), &services);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };
    info!("Starting server at http://{}", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        process::exit(1);
    }
}
