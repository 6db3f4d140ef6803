#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::Mutex;
use uuid::Uuid;

use pricewatch::assets::AssetSet;
use pricewatch::db::schema;
use pricewatch::notify::{Delivery, Notifier, NotifyError};
use pricewatch::quotes::{Quote, QuoteError, QuoteSource};
use pricewatch::store::{ObservationStore, StoreError};

/// Isolated in-memory DB per test.
/// Unique name prevents test interference during parallel execution.
/// A single connection keeps rollbacks ordered before follow-up reads.
pub async fn setup_db() -> SqlitePool {
    let db_name = Uuid::new_v4().to_string();
    let conn = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&conn)
        .await
        .expect("connect sqlite memory db");

    schema::migrate(&pool).await.expect("create prices");

    pool
}

pub async fn count_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM prices")
        .fetch_one(pool)
        .await
        .expect("count prices")
}

pub fn quote(pairs: &[(&str, f64)]) -> Quote {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Returns the queued quotes in order, repeating the last one once exhausted.
pub struct ScriptedSource {
    quotes: Vec<Quote>,
    pub calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(quotes: Vec<Quote>) -> Arc<Self> {
        Arc::new(Self {
            quotes,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for ScriptedSource {
    async fn fetch(&self, _assets: &AssetSet) -> Result<Quote, QuoteError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = n.min(self.quotes.len().saturating_sub(1));
        self.quotes
            .get(idx)
            .cloned()
            .ok_or(QuoteError::Status(500))
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    pub batches: Mutex<Vec<Quote>>,
}

#[async_trait]
impl ObservationStore for InMemoryStore {
    async fn append(&self, quote: &Quote) -> Result<usize, StoreError> {
        self.batches.lock().await.push(quote.clone());
        Ok(quote.len())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, text: &str) -> Result<Delivery, NotifyError> {
        self.sent.lock().await.push(text.to_string());
        Ok(Delivery::Sent)
    }
}
