pub mod errors;
pub mod sqlx_store;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::quotes::Quote;

pub use errors::StoreError;
pub use sqlx_store::SqlxObservationStore;

/// One persisted row of the `prices` table.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Observation {
    pub id: i64,
    pub coin: String,
    pub price_usd: f64,
    pub created_at: Option<NaiveDateTime>,
}

/// Append-only sink for observations.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Records every price in `quote` atomically and returns the number of rows written.
    async fn append(&self, quote: &Quote) -> Result<usize, StoreError>;
}
