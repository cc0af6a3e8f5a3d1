use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use gotreep_backend::{build_router, GotreepServiceFactory};
use gotreep_config::{AppConfig, CorsConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: AppConfig) -> Router {
    let services = GotreepServiceFactory::new(&config).unwrap();
    build_router(Arc::new(config), &services)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app(AppConfig::default())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn every_route_group_is_mounted() {
    let router = app(AppConfig::default());

    let cities = router
        .clone()
        .oneshot(Request::get("/cities").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(cities.status(), StatusCode::BAD_REQUEST);

    for uri in ["/price", "/booking", "/confirm"] {
        let response = router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(read_json(response).await, json!({"message": "Invalid input"}));
    }
}

#[tokio::test]
async fn empty_origin_list_allows_any_origin() {
    let response = app(AppConfig::default())
        .oneshot(
            Request::get("/health")
                .header("origin", "https://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn configured_origins_are_enforced() {
    let config = AppConfig {
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        ..Default::default()
    };
    let router = app(config);

    let allowed = router
        .clone()
        .oneshot(
            Request::get("/health")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );

    let denied = router
        .oneshot(
            Request::get("/health")
                .header("origin", "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}
