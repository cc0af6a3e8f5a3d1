// --- File: crates/gotreep_mail/src/mailer.rs ---
use gotreep_common::models::{EmailMessage, NotificationResult};
use gotreep_common::services::NotificationService;
use gotreep_common::GotreepError;
use gotreep_config::MailConfig;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

use crate::template::{render, DEFAULT_CONFIRMATION_TEMPLATE};

/// Renders and sends booking confirmation emails.
///
/// The template sees the provider's order record under `booking`.
#[derive(Clone)]
pub struct ConfirmationMailer {
    notifications: Arc<dyn NotificationService>,
    subject: String,
    template: String,
}

impl ConfirmationMailer {
    /// Loads `template_path` if set, falling back to the built-in template.
    pub fn new(notifications: Arc<dyn NotificationService>, config: &MailConfig) -> Self {
        let template = match config.template_path.as_deref() {
            Some(path) => match fs::read_to_string(path) {
                Ok(template) => {
                    info!("[Mail] Using confirmation template {}", path);
                    template
                }
                Err(e) => {
                    warn!(
                        "[Mail] Cannot read template {}: {}. Using built-in template.",
                        path, e
                    );
                    DEFAULT_CONFIRMATION_TEMPLATE.to_string()
                }
            },
            None => DEFAULT_CONFIRMATION_TEMPLATE.to_string(),
        };
        Self::with_template(notifications, config.subject.clone(), template)
    }

    pub fn with_template(
        notifications: Arc<dyn NotificationService>,
        subject: String,
        template: String,
    ) -> Self {
        Self {
            notifications,
            subject,
            template,
        }
    }

    pub async fn send_booking_confirmation(
        &self,
        to: &str,
        order: &Value,
    ) -> Result<NotificationResult, GotreepError> {
        let html_body = render(&self.template, &json!({ "booking": order }))?;
        self.notifications
            .send_email(EmailMessage {
                to: to.to_string(),
                subject: self.subject.clone(),
                html_body,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotreep_common::services::BoxFuture;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifications {
        sent: Mutex<Vec<EmailMessage>>,
    }

    impl NotificationService for RecordingNotifications {
        fn send_email(
            &self,
            message: EmailMessage,
        ) -> BoxFuture<'_, NotificationResult, GotreepError> {
            self.sent.lock().unwrap().push(message);
            Box::pin(async {
                Ok(NotificationResult {
                    id: "mail-1".to_string(),
                    status: "sent".to_string(),
                })
            })
        }
    }

    #[tokio::test]
    async fn renders_order_into_message() {
        let notifications = Arc::new(RecordingNotifications::default());
        let mailer = ConfirmationMailer::with_template(
            notifications.clone(),
            "Booking Confirmation - GoTreep".to_string(),
            "Ref {{booking.data.associatedRecords.0.reference}}".to_string(),
        );

        let result = mailer
            .send_booking_confirmation(
                "ana@example.com",
                &json!({"data": {"associatedRecords": [{"reference": "QF4XYZ"}]}}),
            )
            .await
            .unwrap();

        assert_eq!(result.id, "mail-1");
        let sent = notifications.sent.lock().unwrap();
        assert_eq!(
            sent[0],
            EmailMessage {
                to: "ana@example.com".to_string(),
                subject: "Booking Confirmation - GoTreep".to_string(),
                html_body: "Ref QF4XYZ".to_string(),
            }
        );
    }

    #[test]
    fn unreadable_template_path_falls_back_to_built_in() {
        let config = MailConfig {
            template_path: Some("/nonexistent/flight_confirm.html".to_string()),
            ..Default::default()
        };
        let mailer = ConfirmationMailer::new(Arc::new(RecordingNotifications::default()), &config);
        assert_eq!(mailer.template, DEFAULT_CONFIRMATION_TEMPLATE);
        assert_eq!(mailer.subject, "Booking Confirmation - GoTreep");
    }

    #[tokio::test]
    async fn broken_template_fails_before_sending() {
        let notifications = Arc::new(RecordingNotifications::default());
        let mailer = ConfirmationMailer::with_template(
            notifications.clone(),
            "s".to_string(),
            "{{#each x}}".to_string(),
        );
        assert!(mailer
            .send_booking_confirmation("a@b.c", &json!({}))
            .await
            .is_err());
        assert!(notifications.sent.lock().unwrap().is_empty());
    }
}
