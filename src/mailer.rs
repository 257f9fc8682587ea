use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::AppError;

/// A single outbound message for the transactional-email provider.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Opaque identifier the provider assigns to an accepted message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendReceipt {
    pub id: String,
}

/// Client for the Resend transactional-email API.
///
/// The base URL is injected so tests can point the client at a mock server
/// instead of the live API.
#[derive(Debug, Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl MailerClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to create mailer client: {}", e))
            })?;

        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join("emails"))
            .map_err(|e| AppError::Internal(format!("Invalid mailer base URL: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Send one email. Resolves exactly once: a receipt on acceptance, an
    /// error otherwise. No retries at this layer.
    pub async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, AppError> {
        tracing::info!("Dispatching notification email: {}", email.subject);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(email)
            .send()
            .await
            .map_err(|e| AppError::MailTransport(format!("Resend request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::MailTransport(format!(
                "Resend returned {}: {}",
                status, error_text
            )));
        }

        let receipt: SendReceipt = response.json().await.map_err(|e| {
            AppError::MailTransport(format!("Failed to parse Resend response: {}", e))
        })?;

        tracing::info!("✓ Notification email accepted: {}", receipt.id);
        Ok(receipt)
    }
}
