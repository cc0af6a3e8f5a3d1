// --- File: crates/gotreep_amadeus/src/logos.rs ---
use gotreep_common::services::{BoxFuture, LogoService};
use gotreep_common::{create_client, GotreepError};
use gotreep_config::LogoConfig;
use reqwest::Client;
use tracing::{debug, warn};

/// Airline logos from the Airhex CDN.
///
/// The logo URL handed to clients is the final URL after redirects, so it can
/// be embedded directly in an `<img>` tag.
pub struct AirhexLogoService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AirhexLogoService {
    pub fn new(config: &LogoConfig) -> Result<Self, GotreepError> {
        let client = create_client(gotreep_common::DEFAULT_TIMEOUT_SECS, true)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &LogoConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// `{base}/airlines_{code}_{size}_{size}_s.png?apikey={key}`
    pub fn request_url(&self, carrier_code: &str, size: u32) -> String {
        format!(
            "{}/airlines_{}_{}_{}_s.png?apikey={}",
            self.base_url, carrier_code, size, size, self.api_key
        )
    }

    async fn resolve(&self, carrier_code: &str, size: u32) -> Result<String, GotreepError> {
        let response = self.client.get(self.request_url(carrier_code, size)).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("[Airhex] No logo for {} (status {})", carrier_code, status);
            return Ok(String::new());
        }
        let url = response.url().to_string();
        debug!("[Airhex] Logo for {}: {}", carrier_code, url);
        Ok(url)
    }
}

impl LogoService for AirhexLogoService {
    fn logo_url(&self, carrier_code: &str, size: u32) -> BoxFuture<'_, String, GotreepError> {
        let carrier_code = carrier_code.to_string();
        Box::pin(async move { self.resolve(&carrier_code, size).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_sized_logo_url() {
        let service = AirhexLogoService::with_client(
            Client::new(),
            &LogoConfig {
                base_url: "https://content.airhex.com/content/logos/".to_string(),
                api_key: "KEY".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(
            service.request_url("IB", 100),
            "https://content.airhex.com/content/logos/airlines_IB_100_100_s.png?apikey=KEY"
        );
    }
}
