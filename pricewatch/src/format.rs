//! Notification text rendering.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::assets::AssetSet;
use crate::quotes::Quote;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders one cycle's prices in tracked-asset order.
///
/// A `Change:` suffix is added for assets whose previous price is known and
/// positive.
pub fn render(assets: &AssetSet, current: &Quote, previous: &Quote, at: NaiveDateTime) -> String {
    let mut msg = format!(
        "📊 *Crypto Prices (USD)*\nTime: {}\n",
        at.format(TIMESTAMP_FORMAT)
    );

    let priced = assets
        .iter()
        .filter_map(|asset| current.get(&asset.id).map(|price| (asset, price)));

    for (asset, price) in priced {
        let _ = write!(msg, "\n{}: ${:.2}", asset.symbol, price);

        if let Some(last) = previous.get(&asset.id).filter(|p| *p > 0.0) {
            let _ = write!(msg, " Change: {:+.2}$", price - last);
        }
    }

    msg
}
