#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use gotreep_common::models::{CheckoutRequest, CheckoutSession};
    use gotreep_common::services::{BoxFuture, PaymentService};
    use gotreep_common::{external_service_error, GotreepError};
    use gotreep_config::AppConfig;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct FakePayments {
        fail: bool,
        requests: Mutex<Vec<CheckoutRequest>>,
    }

    impl PaymentService for FakePayments {
        fn create_checkout_session(
            &self,
            request: CheckoutRequest,
        ) -> BoxFuture<'_, CheckoutSession, GotreepError> {
            self.requests.lock().unwrap().push(request);
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    Err(external_service_error(
                        "Stripe API",
                        "Status: 400, Message: Invalid currency: xyz",
                    ))
                } else {
                    Ok(CheckoutSession {
                        id: "cs_test_123".to_string(),
                        url: "https://checkout.stripe.com/c/pay/cs_test_123".to_string(),
                    })
                }
            })
        }
    }

    fn app(payments: Arc<FakePayments>) -> Router {
        routes(Arc::new(AppConfig::default()), payments)
    }

    async fn post_booking(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/booking")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn flight_offer_opens_checkout() {
        let payments = Arc::new(FakePayments::default());
        let (status, body) = post_booking(
            app(payments.clone()),
            json!({
                "email": "traveller@example.com",
                "flightOffer": {"price": {"total": "245.60", "currency": "EUR"}}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"checkoutUrl": "https://checkout.stripe.com/c/pay/cs_test_123"})
        );
        let requests = payments.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, 24560);
        assert_eq!(requests[0].currency, "eur");
        assert_eq!(requests[0].customer_email, "traveller@example.com");
    }

    #[tokio::test]
    async fn net_total_opens_checkout_in_default_currency() {
        let payments = Arc::new(FakePayments::default());
        let (status, _) = post_booking(
            app(payments.clone()),
            json!({"email": "traveller@example.com", "netTotal": "99.99"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let requests = payments.requests.lock().unwrap();
        assert_eq!(requests[0].amount, 9999);
        assert_eq!(requests[0].currency, "eur");
    }

    #[tokio::test]
    async fn missing_email_is_invalid_input() {
        let payments = Arc::new(FakePayments::default());
        let (status, body) = post_booking(
            app(payments.clone()),
            json!({"flightOffer": {"price": {"total": "10.00", "currency": "EUR"}}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Invalid input"}));
        assert!(payments.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_offer_and_total_is_invalid_input() {
        let (status, body) = post_booking(
            app(Arc::default()),
            json!({"email": "traveller@example.com"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Invalid input"}));
    }

    #[tokio::test]
    async fn negative_or_non_numeric_price_is_invalid_input() {
        let (status, _) = post_booking(
            app(Arc::default()),
            json!({"email": "a@b.c", "netTotal": -5}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_booking(
            app(Arc::default()),
            json!({"email": "a@b.c", "flightOffer": {"price": {"total": "n/a"}}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stripe_failure_is_500_with_message() {
        let payments = Arc::new(FakePayments {
            fail: true,
            ..Default::default()
        });
        let (status, body) = post_booking(
            app(payments),
            json!({"email": "a@b.c", "netTotal": 10}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error creating booking");
        assert!(body["error"].as_str().unwrap().contains("Invalid currency"));
    }
}
