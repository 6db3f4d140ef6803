use std::collections::HashMap;

use serde_json::Value;

use crate::assets::AssetSet;
use crate::quotes::errors::QuoteError;

/// Currency code every quote is requested and validated in.
pub const VS_CURRENCY: &str = "usd";

/// Raw `/simple/price` body: asset id -> (currency code -> price).
///
/// Entries stay untyped until the tracked ids are picked out, so a malformed
/// entry for an asset we do not track cannot fail the fetch.
pub type SimplePriceResponse = HashMap<String, Value>;

/// Validated prices for one cycle, keyed by asset id.
///
/// Also used as the previous-cycle cache; an empty quote means "nothing seen yet".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Quote {
    prices: HashMap<String, f64>,
}

impl Quote {
    /// Keeps only tracked assets and requires a `usd` price for each of them.
    pub fn from_response(
        assets: &AssetSet,
        mut body: SimplePriceResponse,
    ) -> Result<Self, QuoteError> {
        let mut prices = HashMap::with_capacity(assets.len());

        for id in assets.ids() {
            let price = body
                .remove(id)
                .and_then(|by_currency| by_currency.get(VS_CURRENCY).and_then(Value::as_f64))
                .ok_or_else(|| QuoteError::MissingPrice {
                    asset: id.to_string(),
                    currency: VS_CURRENCY,
                })?;
            prices.insert(id.to_string(), price);
        }

        Ok(Self { prices })
    }

    pub fn get(&self, asset_id: &str) -> Option<f64> {
        self.prices.get(asset_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(String, f64)> for Quote {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(raw: &str) -> SimplePriceResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn keeps_one_entry_per_tracked_asset() {
        let quote = Quote::from_response(
            &AssetSet::default(),
            body(
                r#"{"bitcoin":{"usd":65000.12},"ethereum":{"usd":3400.5},"binancecoin":{"usd":580.25}}"#,
            ),
        )
        .unwrap();

        assert_eq!(quote.len(), 3);
        assert_eq!(quote.get("bitcoin"), Some(65000.12));
        assert_eq!(quote.get("ethereum"), Some(3400.5));
        assert_eq!(quote.get("binancecoin"), Some(580.25));
    }

    #[test]
    fn untracked_assets_are_ignored() {
        let quote = Quote::from_response(
            &AssetSet::default(),
            body(
                r#"{"bitcoin":{"usd":1.0},"ethereum":{"usd":2.0},"binancecoin":{"usd":3.0},"dogecoin":{"usd":0.1}}"#,
            ),
        )
        .unwrap();

        assert_eq!(quote.len(), 3);
        assert_eq!(quote.get("dogecoin"), None);
    }

    #[test]
    fn malformed_untracked_entries_are_ignored() {
        let quote = Quote::from_response(
            &AssetSet::default(),
            body(
                r#"{"bitcoin":{"usd":1.0},"ethereum":{"usd":2.0},"binancecoin":{"usd":3.0},"dogecoin":{"usd":null},"pepe":"delisted"}"#,
            ),
        )
        .unwrap();

        assert_eq!(quote.len(), 3);
        assert_eq!(quote.get("binancecoin"), Some(3.0));
    }

    #[test]
    fn null_tracked_price_is_missing() {
        let err = Quote::from_response(
            &AssetSet::default(),
            body(r#"{"bitcoin":{"usd":1.0},"ethereum":{"usd":null},"binancecoin":{"usd":3.0}}"#),
        )
        .unwrap_err();

        assert!(matches!(err, QuoteError::MissingPrice { asset, .. } if asset == "ethereum"));
    }

    #[test]
    fn missing_asset_fails_whole_quote() {
        let err = Quote::from_response(
            &AssetSet::default(),
            body(r#"{"bitcoin":{"usd":1.0},"binancecoin":{"usd":3.0}}"#),
        )
        .unwrap_err();

        match err {
            QuoteError::MissingPrice { asset, currency } => {
                assert_eq!(asset, "ethereum");
                assert_eq!(currency, "usd");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_currency_does_not_count() {
        let err = Quote::from_response(
            &AssetSet::default(),
            body(r#"{"bitcoin":{"eur":1.0},"ethereum":{"usd":2.0},"binancecoin":{"usd":3.0}}"#),
        )
        .unwrap_err();

        assert!(matches!(err, QuoteError::MissingPrice { asset, .. } if asset == "bitcoin"));
    }
}
