use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::assets::{AssetSet, TrackedAsset};
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data.db";
pub const DEFAULT_QUOTE_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_STEP_BUDGET_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// SQLite connection string. The file is created on first start.
    pub database_url: String,

    /// Base URL of the quote service. `/simple/price` is appended per request.
    pub quote_api_url: String,

    /// Period between cycles. The first cycle runs immediately at startup,
    /// so this only controls the gap between subsequent ones.
    pub poll_interval: Duration,

    /// Fetch or persist taking longer than this logs a warning.
    pub step_budget: Duration,

    /// Ordered `(id, symbol)` table of everything we request and render.
    pub assets: AssetSet,

    // =========================
    // Notification channels
    // =========================
    /// Chat-bot channel. Missing token or chat id is reported as an error on
    /// every cycle rather than disabling the channel.
    pub telegram: TelegramConfig,

    /// Incoming-webhook URL. `None` disables the channel.
    pub webhook_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub chat_id: Option<String>,
}

/// On-disk layout of `config.json`. Only the notification keys are expected
/// in a minimal deployment; everything else falls back to defaults.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    telegram_token: Option<String>,
    telegram_chat_id: Option<String>,
    slack_webhook: Option<String>,
    database_url: Option<String>,
    quote_api_url: Option<String>,
    telegram_api_url: Option<String>,
    poll_interval_secs: Option<u64>,
    step_budget_secs: Option<u64>,
    assets: Option<Vec<TrackedAsset>>,
}

impl AppConfig {
    /// Loads configuration using the strategy compiled into this build.
    #[cfg(not(feature = "env-config"))]
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PRICEWATCH_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(path)
    }

    /// Loads configuration using the strategy compiled into this build.
    #[cfg(feature = "env-config")]
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = serde_json::from_str(raw)?;

        let assets = match file.assets {
            Some(list) => AssetSet::new(list)?,
            None => AssetSet::default(),
        };

        Ok(Self {
            database_url: non_empty(file.database_url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            quote_api_url: non_empty(file.quote_api_url)
                .unwrap_or_else(|| DEFAULT_QUOTE_API_URL.to_string()),
            poll_interval: secs_to_duration(
                "poll_interval_secs",
                file.poll_interval_secs.unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
            )?,
            step_budget: secs_to_duration(
                "step_budget_secs",
                file.step_budget_secs.unwrap_or(DEFAULT_STEP_BUDGET_SECS),
            )?,
            assets,
            telegram: TelegramConfig {
                api_url: non_empty(file.telegram_api_url)
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
                token: non_empty(file.telegram_token),
                chat_id: non_empty(file.telegram_chat_id),
            },
            webhook_url: non_empty(file.slack_webhook),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secs = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match non_empty(lookup(key)) {
                Some(raw) => {
                    let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                        key,
                        value: raw.clone(),
                    })?;
                    secs_to_duration(key, secs)
                }
                None => Ok(Duration::from_secs(default)),
            }
        };
        let poll_interval = secs("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        let step_budget = secs("STEP_BUDGET_SECS", DEFAULT_STEP_BUDGET_SECS)?;

        Ok(Self {
            database_url: non_empty(lookup("DATABASE_URL"))
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            quote_api_url: non_empty(lookup("QUOTE_API_URL"))
                .unwrap_or_else(|| DEFAULT_QUOTE_API_URL.to_string()),
            poll_interval,
            step_budget,
            assets: AssetSet::default(),
            telegram: TelegramConfig {
                api_url: non_empty(lookup("TELEGRAM_API_URL"))
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
                token: non_empty(lookup("TELEGRAM_BOT_TOKEN")),
                chat_id: non_empty(lookup("TELEGRAM_CHAT_ID")),
            },
            webhook_url: non_empty(lookup("SLACK_WEBHOOK")),
        })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn secs_to_duration(key: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            value: secs.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
