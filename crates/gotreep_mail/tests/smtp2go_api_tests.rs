use gotreep_common::models::EmailMessage;
use gotreep_common::services::NotificationService;
use gotreep_config::MailConfig;
use gotreep_mail::{ConfirmationMailer, Smtp2GoNotificationService};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> MailConfig {
    MailConfig {
        api_url: format!("{}/v3/email/send", server.uri()),
        api_key: "api-test-key".to_string(),
        sender: "bookings@gotreep.com".to_string(),
        ..Default::default()
    }
}

fn message() -> EmailMessage {
    EmailMessage {
        to: "ana@example.com".to_string(),
        subject: "Booking Confirmation - GoTreep".to_string(),
        html_body: "<p>booked</p>".to_string(),
    }
}

#[tokio::test]
async fn posts_message_and_returns_email_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .and(body_partial_json(json!({
            "api_key": "api-test-key",
            "to": ["ana@example.com"],
            "sender": "bookings@gotreep.com",
            "subject": "Booking Confirmation - GoTreep",
            "html_body": "<p>booked</p>"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-1",
            "data": {"succeeded": 1, "failed": 0, "failures": [], "email_id": "1r2bDh-4Kp"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = Smtp2GoNotificationService::new(config(&server)).unwrap();
    let result = service.send_email(message()).await.unwrap();
    assert_eq!(result.id, "1r2bDh-4Kp");
    assert_eq!(result.status, "sent");
}

#[tokio::test]
async fn api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "request_id": "req-2",
            "data": {"error": "Sender address not verified", "error_code": "E_ApiResponseCodes.NON_VALIDATED_SENDER"}
        })))
        .mount(&server)
        .await;

    let service = Smtp2GoNotificationService::new(config(&server)).unwrap();
    let err = service.send_email(message()).await.unwrap_err();
    assert!(err.to_string().contains("Sender address not verified"));
}

#[tokio::test]
async fn failed_recipient_is_an_error_even_on_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"succeeded": 0, "failed": 1, "failures": ["ana@example.com bounced"]}
        })))
        .mount(&server)
        .await;

    let service = Smtp2GoNotificationService::new(config(&server)).unwrap();
    let err = service.send_email(message()).await.unwrap_err();
    assert!(err.to_string().contains("bounced"));
}

#[tokio::test]
async fn missing_api_key_sends_nothing() {
    let server = MockServer::start().await;
    let service = Smtp2GoNotificationService::new(MailConfig {
        api_key: String::new(),
        ..config(&server)
    })
    .unwrap();

    assert!(service.send_email(message()).await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn confirmation_mail_carries_booking_reference() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"succeeded": 1, "failed": 0, "email_id": "id-9"}
        })))
        .mount(&server)
        .await;

    let service = Arc::new(Smtp2GoNotificationService::new(config(&server)).unwrap());
    let mailer = ConfirmationMailer::new(service, &MailConfig::default());
    mailer
        .send_booking_confirmation(
            "ana@example.com",
            &json!({"data": {"id": "ORDER1", "associatedRecords": [{"reference": "QF4XYZ"}]}}),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["subject"], "Booking Confirmation - GoTreep");
    assert!(body["html_body"].as_str().unwrap().contains("QF4XYZ"));
}
