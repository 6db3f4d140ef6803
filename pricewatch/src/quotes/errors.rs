use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote service returned status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing {currency} price for {asset}")]
    MissingPrice {
        asset: String,
        currency: &'static str,
    },
}
