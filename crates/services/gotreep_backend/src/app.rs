// --- File: crates/services/gotreep_backend/src/app.rs ---
use axum::{routing::get, Json, Router};
use gotreep_common::services::ServiceFactory;
use gotreep_config::AppConfig;
use http::{header, HeaderValue, Method};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
))]
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Allows any origin when `allowed_origins` is empty, otherwise exactly the
/// listed ones. Unparseable origins are skipped.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Assembles every route group with the shared layers.
pub fn build_router(config: Arc<AppConfig>, services: &dyn ServiceFactory) -> Router {
    let flights_router = gotreep_amadeus::routes(
        config.clone(),
        services.flight_provider(),
        services.logo_service(),
    );
    let checkout_router = gotreep_stripe::routes(config.clone(), services.payment_service());
    let booking_router = gotreep_booking::routes(
        config.clone(),
        services.flight_provider(),
        services.notification_service(),
    );

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .merge(flights_router)
        .merge(checkout_router)
        .merge(booking_router);

    #[cfg(feature = "openapi")]
    {
        use gotreep_amadeus::doc::FlightsApiDoc;
        use gotreep_booking::doc::BookingApiDoc;
        use gotreep_stripe::doc::StripeApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "GoTreep API",
                version = "0.1.0",
                description = "Flight search, pricing, checkout and booking"
            ),
            paths(health_handler),
            tags((name = "Health", description = "Liveness probe"))
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(FlightsApiDoc::openapi());
        openapi_doc.merge(StripeApiDoc::openapi());
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api-docs");

        app = app.merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", openapi_doc));
    }

    if config.cors.allowed_origins.is_empty() {
        info!("CORS: allowing any origin");
    } else {
        info!("CORS: allowing {:?}", config.cors.allowed_origins);
    }

    app.layer(cors_layer(&config.cors.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
