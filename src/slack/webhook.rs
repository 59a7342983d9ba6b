//! Incoming-webhook transport

use crate::error::{Result, SlackLogError};
use crate::slack::{ChatApi, DirectoryMember, OutboundMessage};
use reqwest::Client;

/// Posts messages to a Slack incoming webhook URL.
///
/// Webhooks can only post; there is no user directory behind them, so
/// mention resolution against a `WebhookClient` always fails.
pub struct WebhookClient {
    client: Client,
    webhook_url: String,
}

impl WebhookClient {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self> {
        let webhook_url = webhook_url.into();
        if webhook_url.is_empty() {
            return Err(SlackLogError::Config(
                "Slack webhook URL cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            webhook_url,
        })
    }
}

impl ChatApi for WebhookClient {
    async fn list_users(&self) -> Result<Vec<DirectoryMember>> {
        Err(SlackLogError::Unsupported(
            "incoming webhooks cannot list workspace users".to_string(),
        ))
    }

    async fn post_message(&self, message: &OutboundMessage) -> Result<()> {
        let body = serde_json::to_vec(message)?;

        let response = self
            .client
            .post(&self.webhook_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SlackLogError::SlackApi(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(SlackLogError::SlackApi(format!(
                "webhook returned {}: {}",
                status, error_text
            )))
        }
    }
}
