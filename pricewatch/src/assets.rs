//! Tracked asset table.
//!
//! The asset set drives both the quote request and the rendered message, so
//! it is kept as one ordered list of `(id, symbol)` pairs. Iteration order is
//! the configured order and never changes for the lifetime of the process.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::ConfigError;

/// One tracked asset: the price-source identifier and its display symbol.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TrackedAsset {
    pub id: String,
    pub symbol: String,
}

impl TrackedAsset {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetSet {
    assets: Vec<TrackedAsset>,
}

impl AssetSet {
    /// Builds an asset set, rejecting empty lists and duplicate ids.
    pub fn new(assets: Vec<TrackedAsset>) -> Result<Self, ConfigError> {
        if assets.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "assets",
                value: "[]".to_string(),
            });
        }

        {
            let mut seen = HashSet::new();
            for asset in &assets {
                if asset.id.trim().is_empty() || !seen.insert(asset.id.as_str()) {
                    return Err(ConfigError::InvalidValue {
                        key: "assets",
                        value: asset.id.clone(),
                    });
                }
            }
        }

        Ok(Self { assets })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedAsset> {
        self.assets.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for AssetSet {
    fn default() -> Self {
        Self {
            assets: vec![
                TrackedAsset::new("bitcoin", "BTC"),
                TrackedAsset::new("ethereum", "ETH"),
                TrackedAsset::new("binancecoin", "BNB"),
            ],
        }
    }
}
