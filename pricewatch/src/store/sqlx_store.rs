use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::quotes::Quote;
use crate::store::{ObservationStore, StoreError};

/// SQLx-backed observation sink.
/// Responsible only for the insert batch; schema lives in `db::schema`.
pub struct SqlxObservationStore {
    pool: SqlitePool,
}

impl SqlxObservationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObservationStore for SqlxObservationStore {
    async fn append(&self, quote: &Quote) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;

        let mut written = 0;
        for (coin, price) in quote.iter() {
            // An early return drops `tx`, which rolls the whole batch back.
            sqlx::query("INSERT INTO prices (coin, price_usd) VALUES (?, ?)")
                .bind(coin)
                .bind(price)
                .execute(&mut *tx)
                .await?;
            written += 1;
        }

        tx.commit().await?;

        debug!(rows = written, "observations committed");
        Ok(written)
    }
}
