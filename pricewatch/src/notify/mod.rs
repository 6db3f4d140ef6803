//! Outbound notification channels.
//!
//! Every channel implements [`Notifier`]; the pipeline holds them as
//! `Arc<dyn Notifier>` and attempts each one regardless of how the others did.

pub mod errors;
pub mod telegram;
pub mod webhook;

use async_trait::async_trait;

pub use errors::NotifyError;
pub use telegram::TelegramNotifier;
pub use webhook::WebhookNotifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Channel is disabled by configuration; nothing was sent.
    Skipped,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short channel name used in logs and cycle reports.
    fn channel(&self) -> &'static str;

    async fn deliver(&self, text: &str) -> Result<Delivery, NotifyError>;
}
