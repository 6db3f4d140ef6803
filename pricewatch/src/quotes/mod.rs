pub mod client;
pub mod errors;
pub mod types;

use async_trait::async_trait;

use crate::assets::AssetSet;

pub use client::CoinGeckoClient;
pub use errors::QuoteError;
pub use types::*;

/// Anything that can produce a validated quote for the tracked assets.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, assets: &AssetSet) -> Result<Quote, QuoteError>;
}
