use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::assets::AssetSet;
use crate::quotes::QuoteSource;
use crate::quotes::errors::QuoteError;
use crate::quotes::types::{Quote, SimplePriceResponse, VS_CURRENCY};

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    url: String,
}

impl CoinGeckoClient {
    pub fn new(url: String) -> Result<Self, QuoteError> {
        let http = Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self, assets), fields(assets = assets.len()), level = "debug")]
    pub async fn fetch_prices(&self, assets: &AssetSet) -> Result<Quote, QuoteError> {
        let url = format!("{}/simple/price", self.url);
        let ids = assets.ids().collect::<Vec<_>>().join(",");

        let resp = self
            .http
            .get(&url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", VS_CURRENCY)])
            .header("accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(QuoteError::Status(status.as_u16()));
        }

        let raw = resp.text().await?;
        let body: SimplePriceResponse = serde_json::from_str(&raw)?;
        let quote = Quote::from_response(assets, body)?;

        debug!(prices = quote.len(), "quotes fetched");

        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoClient {
    async fn fetch(&self, assets: &AssetSet) -> Result<Quote, QuoteError> {
        self.fetch_prices(assets).await
    }
}
