// --- File: crates/gotreep_mail/src/service.rs ---
use gotreep_common::models::{EmailMessage, NotificationResult};
use gotreep_common::services::{BoxFuture, NotificationService};
use gotreep_common::{create_client, GotreepError, DEFAULT_TIMEOUT_SECS};
use gotreep_config::MailConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::MailError;

#[derive(Serialize, Debug)]
struct Smtp2GoSendRequest<'a> {
    api_key: &'a str,
    to: [&'a str; 1],
    sender: &'a str,
    subject: &'a str,
    html_body: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct Smtp2GoSendResponse {
    #[serde(default)]
    data: Smtp2GoSendData,
}

#[derive(Deserialize, Debug, Default)]
struct Smtp2GoSendData {
    #[serde(default)]
    succeeded: u32,
    #[serde(default)]
    failed: u32,
    email_id: Option<String>,
    error: Option<String>,
    #[serde(default)]
    failures: Vec<String>,
}

/// Sends one HTML email through `POST {api_url}`.
pub async fn send_via_smtp2go(
    client: &Client,
    config: &MailConfig,
    message: &EmailMessage,
) -> Result<NotificationResult, MailError> {
    if config.api_key.is_empty() {
        return Err(MailError::ConfigError);
    }
    info!("[Mail] Sending '{}' to {}", message.subject, message.to);

    let request = Smtp2GoSendRequest {
        api_key: &config.api_key,
        to: [message.to.as_str()],
        sender: &config.sender,
        subject: &message.subject,
        html_body: &message.html_body,
    };
    let response = client.post(&config.api_url).json(&request).send().await?;
    let status = response.status();
    let body_text = response.text().await?;

    let parsed: Smtp2GoSendResponse = if status.is_success() {
        serde_json::from_str(&body_text)?
    } else {
        serde_json::from_str(&body_text).unwrap_or_default()
    };
    let data = parsed.data;

    if !status.is_success() || data.failed > 0 || data.succeeded == 0 {
        let message = data
            .error
            .or_else(|| data.failures.first().cloned())
            .unwrap_or(body_text);
        error!("[Mail] SMTP2GO rejected the email ({}): {}", status, message);
        return Err(MailError::ApiError {
            status_code: status.as_u16(),
            message,
        });
    }

    Ok(NotificationResult {
        id: data.email_id.unwrap_or_default(),
        status: "sent".to_string(),
    })
}

/// SMTP2GO-backed notification service.
pub struct Smtp2GoNotificationService {
    client: Client,
    config: MailConfig,
}

impl Smtp2GoNotificationService {
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let client = create_client(DEFAULT_TIMEOUT_SECS, false)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: MailConfig) -> Self {
        Self { client, config }
    }
}

impl NotificationService for Smtp2GoNotificationService {
    fn send_email(&self, message: EmailMessage) -> BoxFuture<'_, NotificationResult, GotreepError> {
        Box::pin(async move { Ok(send_via_smtp2go(&self.client, &self.config, &message).await?) })
    }
}
