use std::sync::Arc;

use anyhow::Context;
use pricewatch::{
    config::AppConfig,
    db::Db,
    logger::{LogFormat, init_tracing},
    metrics::counters::Counters,
    notify::{Notifier, TelegramNotifier, WebhookNotifier},
    pipeline::Pipeline,
    quotes::CoinGeckoClient,
    scheduler::scheduler::Scheduler,
    store::SqlxObservationStore,
};

/// Opens the SQLite file and ensures the `prices` table exists.
async fn init_store(cfg: &AppConfig) -> anyhow::Result<Arc<SqlxObservationStore>> {
    let db = Db::connect(&cfg.database_url)
        .await
        .with_context(|| format!("DB init failed for {}", cfg.database_url))?;
    db.migrate().await.context("DB migration failed")?;

    Ok(Arc::new(SqlxObservationStore::new(db.pool.clone())))
}

/// Builds the notification channels in delivery order.
fn setup_notifiers(cfg: &AppConfig) -> Vec<Arc<dyn Notifier>> {
    let http = reqwest::Client::new();

    let telegram = TelegramNotifier::new(http.clone(), &cfg.telegram);
    if !telegram.is_configured() {
        tracing::warn!("Telegram token or chat id missing, every cycle will report it");
    }

    if cfg.webhook_url.is_none() {
        tracing::info!("Webhook not configured, channel disabled");
    }
    let webhook = WebhookNotifier::new(http, cfg.webhook_url.clone());

    vec![
        Arc::new(telegram) as Arc<dyn Notifier>,
        Arc::new(webhook),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_env = std::env::var("APP_ENV").ok();
    init_tracing(LogFormat::from_app_env(app_env.as_deref()));

    tracing::info!("Starting price tracker...");

    let cfg = AppConfig::load().context("failed to load configuration")?;

    let store = init_store(&cfg).await?;
    let source = Arc::new(CoinGeckoClient::new(cfg.quote_api_url.clone())?);

    let pipeline = Pipeline::new(
        cfg.assets.clone(),
        source,
        store,
        setup_notifiers(&cfg),
        Counters::default(),
    )
    .with_step_budget(cfg.step_budget);

    let scheduler = Scheduler::new(pipeline, cfg.poll_interval);

    tokio::select! {
        _ = scheduler.run() => {}
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
