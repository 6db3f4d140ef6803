use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::notify::{Delivery, Notifier, NotifyError};

const CHANNEL: &str = "telegram";

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Telegram Bot API `sendMessage` channel.
#[derive(Clone)]
pub struct TelegramNotifier {
    http: Client,
    api_url: String,
    token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramNotifier {
    pub fn new(http: Client, cfg: &TelegramConfig) -> Self {
        Self {
            http,
            api_url: cfg.api_url.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
            chat_id: cfg.chat_id.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.chat_id.is_some()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn deliver(&self, text: &str) -> Result<Delivery, NotifyError> {
        let (Some(token), Some(chat_id)) = (&self.token, &self.chat_id) else {
            return Err(NotifyError::MissingConfig(
                "TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID",
            ));
        };

        // The token is part of the path; never log this URL.
        let url = format!("{}/bot{}/sendMessage", self.api_url, token);

        let resp = self
            .http
            .post(&url)
            .json(&SendMessage { chat_id, text })
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(NotifyError::Status {
                channel: CHANNEL,
                status: status.as_u16(),
            });
        }

        debug!("telegram message sent");
        Ok(Delivery::Sent)
    }
}
