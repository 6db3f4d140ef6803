use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::notify::{Delivery, Notifier, NotifyError};

const CHANNEL: &str = "webhook";

#[derive(Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Slack-style incoming webhook. Without a URL the channel is disabled.
#[derive(Clone)]
pub struct WebhookNotifier {
    http: Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(http: Client, url: Option<String>) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn deliver(&self, text: &str) -> Result<Delivery, NotifyError> {
        let Some(url) = &self.url else {
            debug!("webhook not configured, skipping");
            return Ok(Delivery::Skipped);
        };

        let resp = self
            .http
            .post(url)
            .json(&WebhookPayload { text })
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status >= 300 {
            return Err(NotifyError::Status {
                channel: CHANNEL,
                status,
            });
        }

        debug!(status, "webhook message sent");
        Ok(Delivery::Sent)
    }
}
